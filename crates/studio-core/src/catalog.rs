//! ============================================================================
//! Catalog - Studio packages and engineer add-ons
//! ============================================================================
//! Static, read-only list of everything bookable at UNDERLA.STUDIO.
//! Primary packages are single-select; "Engineer Add-ons" are multi-select.
//! ============================================================================

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Package identifier (stable across catalog edits)
pub type PackageId = u32;

/// Package category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Recording & Tracking")]
    RecordingTracking,
    #[serde(rename = "Production & Mixing")]
    ProductionMixing,
    #[serde(rename = "Podcasting & Voice Over")]
    PodcastingVoiceOver,
    #[serde(rename = "Engineer Add-ons")]
    EngineerAddons,
}

impl Category {
    /// Display order on the booking page
    pub const ALL: [Category; 4] = [
        Category::RecordingTracking,
        Category::ProductionMixing,
        Category::PodcastingVoiceOver,
        Category::EngineerAddons,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecordingTracking => "Recording & Tracking",
            Self::ProductionMixing => "Production & Mixing",
            Self::PodcastingVoiceOver => "Podcasting & Voice Over",
            Self::EngineerAddons => "Engineer Add-ons",
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_label(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == wanted)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable package or add-on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: PackageId,
    pub category: Category,
    pub title: String,
    /// Human price string, e.g. "+$50 / hour"
    pub price_display: String,
    /// Base unit cost in whole dollars
    pub price: u32,
    pub description: String,
    pub details: Vec<String>,
}

impl Package {
    pub fn new(
        id: PackageId,
        category: Category,
        title: &str,
        price: u32,
        price_display: &str,
        details: &[&str],
        description: &str,
    ) -> Self {
        Self {
            id,
            category,
            title: title.to_string(),
            price_display: price_display.to_string(),
            price,
            description: description.to_string(),
            details: details.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Add-ons are toggled independently of the primary package
    pub fn is_addon(&self) -> bool {
        self.category == Category::EngineerAddons
    }
}

/// Ordered, read-only package list
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    packages: Vec<Package>,
}

impl Catalog {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    /// The shipped studio catalog
    pub fn studio() -> &'static Catalog {
        &STUDIO_CATALOG
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn get(&self, id: PackageId) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    /// Case-insensitive exact title match
    pub fn find_by_title(&self, title: &str) -> Option<&Package> {
        let wanted = title.trim().to_lowercase();
        self.packages.iter().find(|p| p.title.to_lowercase() == wanted)
    }

    /// Packages in a category (case-insensitive), or everything when `None`.
    /// An unrecognised category matches nothing.
    pub fn by_category(&self, category: Option<&str>) -> Vec<&Package> {
        match category {
            None => self.packages.iter().collect(),
            Some(label) => {
                let wanted = label.trim().to_lowercase();
                self.packages
                    .iter()
                    .filter(|p| p.category.as_str().to_lowercase() == wanted)
                    .collect()
            }
        }
    }

    pub fn primary_packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter().filter(|p| !p.is_addon())
    }

    pub fn addons(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter().filter(|p| p.is_addon())
    }
}

static STUDIO_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    use Category::*;
    Catalog::new(vec![
        // Recording & Tracking
        Package::new(1, RecordingTracking, "Solo Artist Demo", 120, "$120",
            &["3-hour session", "Vocal & 1 Instrument Setup", "Access to vocal tuning software", "Stereo bounce of raw tracks"],
            "Perfect for singer-songwriters. Bring your own engineer or add one of ours."),
        Package::new(2, RecordingTracking, "Full Band Basic Tracking", 300, "$300",
            &["5-hour block", "Live off-the-floor setup", "Up to 5 musicians", "Use of all amps & backline"],
            "Capture the live energy of your band. Engineer not included."),
        Package::new(3, RecordingTracking, "Drum Tracking", 150, "$150",
            &["4-hour session", "Access to studio kit & mics", "World-class acoustic space", "Raw multitracks provided"],
            "Get massive, punchy drum sounds for your project. Bring your own engineer."),
        Package::new(16, RecordingTracking, "4-Hour Dry Hire Block", 200, "$200",
            &["4-hour session", "Access to live room & control room", "Use your own laptop & interface", "Bring your own engineer"],
            "The perfect blank canvas. You get our world-class rooms; you bring the personnel."),
        Package::new(12, RecordingTracking, "Studio Rehearsal", 60, "$60 / hour",
            &["Access to live room & PA", "Get comfortable with the space", "Dial in monitor mixes", "A pro space to practice"],
            "Practice in a professional environment with a top-tier sound system."),
        // Production & Mixing
        Package::new(4, ProductionMixing, "Single Song Production Block", 750, "$750",
            &["Full day (8-hour) studio lockout", "Access to all mics, instruments & software", "Pre-production consultation (30 mins)", "Ideal for artists with their own engineer"],
            "A full day dedicated to bringing one song to life. You run the session."),
        Package::new(5, ProductionMixing, "EP Production Block (5 Days)", 3500, "$3,500",
            &["5 consecutive studio days (40 hours)", "Dedicated production support", "Full access to gear library", "Perfect for a cohesive project"],
            "The ultimate creative deep-dive. Bring your engineer and craft your next record."),
        Package::new(17, ProductionMixing, "Music Video Production + BTS", 1200, "$1,200",
            &["Full day (8-hour) studio lockout", "4K multi-camera video shoot", "Behind-the-scenes photographer", "Basic lighting package included"],
            "Create a stunning music video and get all the social content you need in one session."),
        Package::new(13, ProductionMixing, "In-House Mastering (per song)", 100, "$100",
            &["Final polish and loudness optimization", "High-end analog & digital gear", "2 revisions included", "Delivery for all streaming platforms"],
            "The crucial final step to make your music sound great everywhere."),
        Package::new(6, ProductionMixing, "In-House Mixing (per song)", 250, "$250",
            &["Stems mixing by our house engineer", "2 revisions included", "Analog summing for warmth", "Master-ready WAV file"],
            "Let our experienced engineers give your track a professional, polished sound."),
        // Podcasting & Voice Over
        Package::new(7, PodcastingVoiceOver, "Podcast Quick Start", 80, "$80",
            &["1-hour recording session", "Up to 2 hosts", "Professional mics & headphones", "Raw audio files provided"],
            "Record your podcast episode with pristine audio quality. Just show up and talk."),
        Package::new(8, PodcastingVoiceOver, "Video Podcast Package", 250, "$250",
            &["2-hour session", "3-camera 4K setup", "Professional lighting", "Synced audio & video files"],
            "Elevate your podcast with high-quality video. We handle the tech."),
        Package::new(9, PodcastingVoiceOver, "Voice Over Demo Reel", 200, "$200",
            &["2-hour session", "Access to script library", "Engineer to direct & record", "Edited & master-ready files"],
            "Create a professional voice-over demo that stands out to casting directors."),
        Package::new(14, PodcastingVoiceOver, "Audiobook Recording Block", 250, "$250",
            &["4-hour recording block", "Ultra-quiet vocal booth", "Engineer to monitor levels", "Punch-and-roll recording"],
            "Comfortable and professional space for narrating your audiobook."),
        // Engineer Add-ons
        Package::new(10, EngineerAddons, "Studio Engineer (Hourly)", 50, "+$50 / hour",
            &["Add a professional engineer to any session", "Expertise in our gear & workflow", "Focus on your performance", "Minimum 3 hours"],
            "Let our pros handle the technical side so you can focus on creativity."),
        Package::new(11, EngineerAddons, "Live Stream Technician", 150, "+$150 / event",
            &["For our Monday night fundraiser slot", "Manages audio & video streams", "Ensures a smooth broadcast", "Technical support on-site"],
            "Guarantees a high-quality, professional live stream for your performance."),
        Package::new(18, EngineerAddons, "Session Musician", 100, "+$100 - $150 / hour",
            &["Pro instrumentalist for your track", "Guitar, Bass, Drums, Keys available", "Contact for specific needs", "Minimum 2 hours"],
            "Need a pro to lay down the perfect part? Our roster of session musicians can add that magic touch to your recording."),
        Package::new(19, EngineerAddons, "Gear Rental", 0, "Contact for Pricing",
            &["Vintage Guitars & Amps", "Analog Synthesizers", "Specialty Microphones", "Daily & Weekly Rates available"],
            "Access our curated collection of vintage and modern gear for your session, or for off-site rental."),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_studio_catalog_ids_unique() {
        let catalog = Catalog::studio();
        let mut ids: Vec<_> = catalog.packages().iter().map(|p| p.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 18);
    }

    #[test]
    fn test_addon_flag_follows_category() {
        let catalog = Catalog::studio();
        assert!(catalog.get(10).unwrap().is_addon());
        assert!(!catalog.get(1).unwrap().is_addon());
        assert_eq!(catalog.addons().count(), 4);
    }

    #[test]
    fn test_find_by_title_case_insensitive() {
        let catalog = Catalog::studio();
        let pkg = catalog.find_by_title("  drum TRACKING ").unwrap();
        assert_eq!(pkg.id, 3);
        assert!(catalog.find_by_title("Drum").is_none());
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::studio();
        assert_eq!(catalog.by_category(None).len(), 18);
        assert_eq!(catalog.by_category(Some("podcasting & voice over")).len(), 4);
        assert!(catalog.by_category(Some("Karaoke")).is_empty());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::EngineerAddons).unwrap();
        assert_eq!(json, "\"Engineer Add-ons\"");
        assert_eq!(Category::from_label("production & mixing"), Some(Category::ProductionMixing));
    }
}
