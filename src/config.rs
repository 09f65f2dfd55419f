//! Settings that control how the dashboard behaves.

use crate::rent::RentPolicy;

/// The number of months shown on the rent tracker when not otherwise configured.
pub const DEFAULT_MONTHS_DISPLAYED: usize = 6;

/// The config for the dashboard, built from the server's command line arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// How many months, ending at the current month, the rent tracker shows.
    pub months_displayed: usize,
    /// How kitchen hours change a member's rent.
    pub rent_policy: RentPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            local_timezone: "Etc/UTC".to_owned(),
            months_displayed: DEFAULT_MONTHS_DISPLAYED,
            rent_policy: RentPolicy::default(),
        }
    }
}
