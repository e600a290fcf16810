//! Locale-aware comparison of sort keys

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use icu_provider::DataLocale;

use crate::error::{CoreError, CoreResult};

/// Compares two sort keys
pub trait KeyComparator {
    fn compare(&self, a: &str, b: &str) -> Ordering;

    /// Locale tag the comparison follows
    fn locale(&self) -> &str;
}

/// ICU collator for one locale
pub struct LocaleCollator {
    tag: String,
    collator: Collator,
}

impl std::fmt::Debug for LocaleCollator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleCollator").field("locale", &self.tag).finish()
    }
}

impl LocaleCollator {
    /// Build a collator from a BCP-47 tag such as `ja`
    pub fn new(tag: &str) -> CoreResult<Self> {
        let locale: Locale = tag.trim().parse().map_err(|e| CoreError::Collation {
            locale: tag.to_string(),
            message: format!("{}", e),
        })?;

        let collator = Collator::try_new(&DataLocale::from(&locale), CollatorOptions::new())
            .map_err(|e| CoreError::Collation {
                locale: tag.to_string(),
                message: format!("{}", e),
            })?;

        log::debug!("collator ready for locale {}", locale);
        Ok(Self {
            tag: locale.to_string(),
            collator,
        })
    }

    /// Japanese collation
    pub fn japanese() -> CoreResult<Self> {
        Self::new("ja")
    }
}

impl KeyComparator for LocaleCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }

    fn locale(&self) -> &str {
        &self.tag
    }
}

// ==================== Tests ====================
