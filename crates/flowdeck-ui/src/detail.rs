#![forbid(unsafe_code)]

//! Node detail lookup.
//!
//! Maps a node's raw label (possibly prefixed with an icon glyph) to a
//! [`DetailRecord`] through an explicitly ordered catalog. Matching is
//! substring containment: the cleaned label must contain the entry key
//! (with the key's leading `?` stripped), and the first entry in catalog
//! order wins — overlapping keys are resolved by position, so order is
//! part of the contract, not an accident of map iteration. Unknown labels
//! get the generic fallback.

use unicode_segmentation::UnicodeSegmentation;

/// Fixed four-field description of one workflow step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetailRecord {
    /// What the step does.
    pub description: String,
    /// How it is implemented.
    pub technical: String,
    /// What the user sees.
    pub experience: String,
    /// Where the flow goes next.
    pub next_step: String,
}

impl DetailRecord {
    /// Create a record from its four narrative fields.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        technical: impl Into<String>,
        experience: impl Into<String>,
        next_step: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            technical: technical.into(),
            experience: experience.into(),
            next_step: next_step.into(),
        }
    }
}

/// One rendered section of a detail view: a heading and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetailSection {
    /// Section heading.
    pub heading: String,
    /// Section body.
    pub body: String,
}

impl DetailSection {
    fn new(heading: &str, body: impl Into<String>) -> Self {
        Self {
            heading: heading.to_string(),
            body: body.into(),
        }
    }
}

/// Priority-ordered catalog of `(key, record)` entries plus a fallback.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetailCatalog {
    entries: Vec<(String, DetailRecord)>,
}

impl Default for DetailCatalog {
    fn default() -> Self {
        Self::workflow_default()
    }
}

impl DetailCatalog {
    /// An empty catalog: every lookup yields the fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a catalog from explicitly ordered entries.
    #[must_use]
    pub fn from_entries(entries: Vec<(String, DetailRecord)>) -> Self {
        Self { entries }
    }

    /// Append an entry at the lowest priority (builder).
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, record: DetailRecord) -> Self {
        self.entries.push((key.into(), record));
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the record for a raw node label.
    ///
    /// Returns the matched record, or `None` when no entry matches (the
    /// caller renders the fallback via [`DetailCatalog::sections_for`]).
    #[must_use]
    pub fn lookup(&self, raw_label: &str) -> Option<&DetailRecord> {
        let cleaned = normalize_label(raw_label);
        self.entries.iter().find_map(|(key, record)| {
            let key = key.trim_start_matches('?').trim();
            if !key.is_empty() && cleaned.contains(key) {
                Some(record)
            } else {
                None
            }
        })
    }

    /// Render the detail sections for a raw node label, in fixed order.
    ///
    /// Matched labels get Description / Technical Implementation / User
    /// Experience / Next Step; unmatched labels get the generic fallback
    /// ("About This Node" / "More Information").
    #[must_use]
    pub fn sections_for(&self, raw_label: &str) -> Vec<DetailSection> {
        match self.lookup(raw_label) {
            Some(record) => vec![
                DetailSection::new("Description", record.description.clone()),
                DetailSection::new("Technical Implementation", record.technical.clone()),
                DetailSection::new("User Experience", record.experience.clone()),
                DetailSection::new("Next Step", record.next_step.clone()),
            ],
            None => vec![
                DetailSection::new(
                    "About This Node",
                    "Interactive step in the visualized content workflow.",
                ),
                DetailSection::new(
                    "More Information",
                    "Detailed information for this step is still being written. \
                     The surrounding flowchart shows the complete workflow.",
                ),
            ],
        }
    }

    /// The built-in catalog for the content-generation workflow.
    #[must_use]
    pub fn workflow_default() -> Self {
        let e = |key: &str, d: &str, t: &str, x: &str, n: &str| {
            (key.to_string(), DetailRecord::new(d, t, x, n))
        };
        Self {
            entries: vec![
                e(
                    "User Login",
                    "The user signs in to the platform with email/password or a social account.",
                    "Hosted authentication issues a JWT-backed session.",
                    "Social and magic-link options keep the login friction low.",
                    "Authenticated users land on their dashboard.",
                ),
                e(
                    "Select Content",
                    "The user picks a content type and platform-specific requirements.",
                    "The form adapts to the chosen platform, with validation and length limits.",
                    "Platform tips are shown alongside the input fields.",
                    "The request is handed to processing with platform markers attached.",
                ),
                e(
                    "User Authenticated?",
                    "Checks for a valid session and sufficient permissions.",
                    "Server-side token validation plus a role check.",
                    "Unauthenticated visitors are sent to login with a return URL.",
                    "Authenticated users continue to content selection.",
                ),
                e(
                    "Pro Plan?",
                    "Checks for an active Pro subscription.",
                    "Subscription status is read from the billing provider, cached.",
                    "Free users see an upgrade prompt with a benefits comparison.",
                    "Pro users continue; free users proceed within quota or upgrade.",
                ),
                e(
                    "Upgrade to Pro",
                    "Takes the user to the payment page to upgrade their plan.",
                    "Payment processing with webhooks keeping subscription state current.",
                    "A single pricing page with monthly and annual options.",
                    "After payment the user returns to their workflow with Pro active.",
                ),
                e(
                    "AI Processing",
                    "The request is routed across the provider network.",
                    "A load balancer picks the provider by request type and response metrics.",
                    "A live progress indicator estimates completion time.",
                    "The processed draft moves on to content generation.",
                ),
                e(
                    "Generate Content",
                    "Produces platform-optimized content in the requested tone and length.",
                    "A multi-stage pipeline applies formatting and engagement touches.",
                    "The preview updates live while generation runs.",
                    "The draft is presented for review before saving.",
                ),
                e(
                    "Content Approved?",
                    "The user approves the draft or asks for a revision.",
                    "Review feedback is captured for future generations.",
                    "Inline editing with version comparison.",
                    "Approved drafts continue to save and download; rejections regenerate.",
                ),
                e(
                    "Save & Download",
                    "Stores the approved content and offers export formats.",
                    "Content is stored encrypted with multi-format export.",
                    "Copy, PDF, and social-ready image downloads.",
                    "The user returns to the dashboard or their content library.",
                ),
                e(
                    "Business Planner?",
                    "Optional branch into the business-plan generator.",
                    "Domain-tuned models handle market analysis and projections.",
                    "A guided intake collects industry and key parameters.",
                    "Inputs feed the plan generation step.",
                ),
                e(
                    "Generate Plan",
                    "Builds a full business plan from the collected inputs.",
                    "Structured generation produces summary, analysis, and projections.",
                    "Section-by-section preview with editing.",
                    "The finished plan is presented for review and download.",
                ),
                e(
                    "Process Complete",
                    "The workflow finished and every requested output was delivered.",
                    "Completion is logged and quotas are updated.",
                    "A confirmation with suggested next steps.",
                    "Start new content, open the library, or view analytics.",
                ),
            ],
        }
    }
}

/// Clean a raw node label for matching.
///
/// Strips leading graphemes that do not start with an alphabetic character
/// (icon glyphs, bullets, emoji — including multi-scalar clusters), then
/// trims surrounding whitespace.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    raw.grapheme_indices(true)
        .find(|(_, g)| g.chars().next().is_some_and(char::is_alphabetic))
        .map(|(i, _)| raw[i..].trim().to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
