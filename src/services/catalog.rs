// src/services/catalog.rs
use std::collections::HashMap;

use thiserror::Error;

use crate::message::DEFAULT_LANGUAGE;

/// Canned reply categories, in keyword-matching priority order
/// (`Default` last, it never matches).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Greeting,
    Services,
    Pricing,
    Contact,
    Website,
    Seo,
    Social,
    Branding,
    Thanks,
    Farewell,
    Default,
}

impl Topic {
    pub const ALL: [Topic; 11] = [
        Topic::Greeting,
        Topic::Services,
        Topic::Pricing,
        Topic::Contact,
        Topic::Website,
        Topic::Seo,
        Topic::Social,
        Topic::Branding,
        Topic::Thanks,
        Topic::Farewell,
        Topic::Default,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Topic::Greeting => "greeting",
            Topic::Services => "services",
            Topic::Pricing => "pricing",
            Topic::Contact => "contact",
            Topic::Website => "website",
            Topic::Seo => "seo",
            Topic::Social => "social",
            Topic::Branding => "branding",
            Topic::Thanks => "thanks",
            Topic::Farewell => "farewell",
            Topic::Default => "default",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no `en` table")]
    MissingEnglish,

    #[error("language `{0}` has no default reply")]
    MissingDefault(String),

    #[error("language `{language}` has an empty `{topic}` reply")]
    EmptyReply { language: String, topic: Topic },
}

/// Last resort when a table has nothing at all to say. Unreachable for a
/// validated catalog.
pub const CONTACT_REPLY: &str = "I'm here to help! Contact MIDMES directly: +251 979 029 768 or email: contactmidmes@gmail.com";

pub type TopicTable = HashMap<Topic, String>;

/// Language tag -> topic -> reply text. Built once at startup, read-only after.
#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    languages: HashMap<String, TopicTable>,
}

impl ResponseCatalog {
    /// Build a catalog, checking that English exists and that every language
    /// can always answer with a non-empty `default`.
    pub fn new(languages: HashMap<String, TopicTable>) -> Result<Self, CatalogError> {
        if !languages.contains_key(DEFAULT_LANGUAGE) {
            return Err(CatalogError::MissingEnglish);
        }
        for (language, table) in &languages {
            match table.get(&Topic::Default) {
                Some(text) if !text.trim().is_empty() => {}
                _ => return Err(CatalogError::MissingDefault(language.clone())),
            }
            if let Some((topic, _)) = table.iter().find(|(_, text)| text.trim().is_empty()) {
                return Err(CatalogError::EmptyReply {
                    language: language.clone(),
                    topic: *topic,
                });
            }
        }
        Ok(Self { languages })
    }

    /// The MIDMES English and Amharic replies, validated like any other table.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin_tables())
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Requested language, then English for the same topic, then the
    /// requested language's default, then the English default.
    pub fn lookup(&self, language: &str, topic: Topic) -> &str {
        let requested = self.languages.get(language);
        let english = self.languages.get(DEFAULT_LANGUAGE);

        requested
            .and_then(|t| t.get(&topic))
            .or_else(|| english.and_then(|t| t.get(&topic)))
            .or_else(|| requested.and_then(|t| t.get(&Topic::Default)))
            .or_else(|| english.and_then(|t| t.get(&Topic::Default)))
            .map(String::as_str)
            .unwrap_or(CONTACT_REPLY)
    }
}

fn builtin_tables() -> HashMap<String, TopicTable> {
    let mut languages = HashMap::new();
    languages.insert("en".to_string(), table(EN_REPLIES));
    languages.insert("am".to_string(), table(AM_REPLIES));
    languages
}

fn table(entries: &[(Topic, &str)]) -> TopicTable {
    entries
        .iter()
        .map(|(topic, text)| (*topic, text.to_string()))
        .collect()
}

const EN_SERVICES: &str = "🚀 **Our Services:**

🌐 **Web Design & Development**
- Custom websites
- E-commerce solutions
- Responsive design

🔍 **SEO Optimization**
- Google ranking improvement
- Local SEO
- Technical SEO

📱 **Social Media Management**
- Content creation
- Community management
- Paid advertising

🎨 **Branding & Identity**
- Logo design
- Brand guides
- Marketing materials

📢 **Digital Advertising**
- Google Ads
- Social media ads
- Retargeting

Which service interests you?";

const EN_CONTACT: &str = "📞 **Contact MIDMES:**

**Phone:** +251 979 029 768
**Email:** contactmidmes@gmail.com
**Location:** Addis Ababa, Ethiopia

**Business Hours:**
Mon-Fri: 8:30 AM - 5:30 PM
Sat: 9:00 AM - 1:00 PM

Would you like to schedule a consultation?";

const EN_REPLIES: &[(Topic, &str)] = &[
    (
        Topic::Greeting,
        "👋 Hello! I'm MIDMES AI assistant. We specialize in web design, SEO, branding, and digital marketing. How can I help you today?",
    ),
    (Topic::Services, EN_SERVICES),
    (
        Topic::Pricing,
        "💵 **Pricing:** Our services are customized based on your specific needs. We offer competitive packages for all business sizes. Contact us for a free quote!",
    ),
    (Topic::Contact, EN_CONTACT),
    (
        Topic::Website,
        "🌐 **Web Design:** We create stunning, high-performance websites that convert visitors into customers. Our process includes strategy, design, development, and ongoing optimization.",
    ),
    (
        Topic::Seo,
        "🔍 **SEO Services:** We help businesses rank higher in search results through comprehensive SEO strategies including technical optimization, content creation, and link building.",
    ),
    (
        Topic::Social,
        "📱 **Social Media:** We manage your social media presence with engaging content, strategic campaigns, and community management to build brand loyalty.",
    ),
    (
        Topic::Branding,
        "🎨 **Branding:** We develop memorable brand identities that resonate with your audience and differentiate you from competitors.",
    ),
    (
        Topic::Thanks,
        "You're welcome! 😊 Is there anything else I can help you with?",
    ),
    (
        Topic::Farewell,
        "Goodbye! 👋 Feel free to reach out if you have more questions. Have a great day!",
    ),
    (
        Topic::Default,
        "Thanks for your message! I'm MIDMES AI assistant. I can help you with web design, SEO, branding, digital marketing, and more. What would you like to know?",
    ),
];

const AM_SERVICES: &str = "🚀 **የኛ አገልግሎቶች:**

🌐 **ድር ጣቢያ ንድፍ እና ልማት**
- ብጁ ድር ጣቢያዎች
- የኢ-ንግድ መፍትሄዎች
- ለሁሉም መሳሪያ ተስማሚ ዲዛይን

🔍 **SEO ማመቻቸት**
- በጉግል ላይ የተሻለ ስፍራ
- አካባቢያዊ SEO
- ቴክኒካል SEO

📱 **ማህበራዊ ሚዲያ አስተዳደር**
- የይዘት ፍጠር
- ማህበረሰብ አስተዳደር
- የተከፈለ ማስታወቂያ

የትኛው አገልግሎት ያስተውሎታል?";

const AM_CONTACT: &str = "📞 **MIDMES ያግኙ፡**

**ስልክ፡** +251 979 029 768
**ኢሜይል፡** contactmidmes@gmail.com
**አድራሻ፡** አዲስ አበባ፣ ኢትዮጵያ

**የስራ ሰዓት፡**
ሰኞ-አርብ፡ ከጠዋት 8፡30 - ከምሽቱ 5፡30
ቅዳሜ፡ ከጠዋት 9፡00 - ከምሽቱ 1፡00

ነፃ ውይይት ለማቅረብ ይፈልጋሉ?";

// Amharic is partial; missing topics come from the English table.
const AM_REPLIES: &[(Topic, &str)] = &[
    (
        Topic::Greeting,
        "ሰላም! 👋 እኔ MIDMES AI ረዳት ነኝ። በድር ንድፍ፣ SEO፣ ብሬንዲንግ እና ዲጂታል ግብይት እንተገኝላለን። ዛሬ እንዴት ልርዳችሁ እችላለሁ?",
    ),
    (Topic::Services, AM_SERVICES),
    (Topic::Contact, AM_CONTACT),
    (
        Topic::Default,
        "ለMIDMES ፍላጎት አመሰግናለሁ! በዲጂታል ግብይት ፍላጎትዎ ልርዳችሁ እፈልጋለሁ። ምን ማወቅ ትፈልጋለህ?",
    ),
];
