// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// The visitor's cookie consent, as reported by the consent manager.
///
/// Polled synchronously whenever the renderer decides whether it may call
/// the live endpoint.
pub trait ConsentProvider: Send + Sync {
    fn has_statistics_consent(&self) -> bool;

    fn has_marketing_consent(&self) -> bool;

    /// Either category unlocks the live feed request
    fn allows_live_fetch(&self) -> bool {
        self.has_statistics_consent() || self.has_marketing_consent()
    }
}

/// Fixed consent answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticConsent {
    pub statistics: bool,
    pub marketing: bool,
}

impl StaticConsent {
    pub fn granted() -> Self {
        Self {
            statistics: true,
            marketing: true,
        }
    }

    pub fn denied() -> Self {
        Self::default()
    }
}

impl ConsentProvider for StaticConsent {
    fn has_statistics_consent(&self) -> bool {
        self.statistics
    }

    fn has_marketing_consent(&self) -> bool {
        self.marketing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_category_allows_live_fetch() {
        assert!(StaticConsent::granted().allows_live_fetch());
        assert!(!StaticConsent::denied().allows_live_fetch());

        let statistics_only = StaticConsent {
            statistics: true,
            marketing: false,
        };
        assert!(statistics_only.allows_live_fetch());

        let marketing_only = StaticConsent {
            statistics: false,
            marketing: true,
        };
        assert!(marketing_only.allows_live_fetch());
    }
}
