use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::NaiveTime;

/// Application-level constants
pub const APP_NAME: &str = "Navalha";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bearer token env var for the admin panel.
pub const ADMIN_TOKEN_ENV: &str = "NAVALHA_ADMIN_TOKEN";

/// Get the application data directory
/// ~/Navalha/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Navalha")
}

/// Database path: `$NAVALHA_DB` or `~/Navalha/navalha.db`.
pub fn database_path() -> PathBuf {
    std::env::var("NAVALHA_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| app_data_dir().join("navalha.db"))
}

/// Bind address: `$NAVALHA_BIND` or `127.0.0.1:8787`.
pub fn bind_addr() -> SocketAddr {
    std::env::var("NAVALHA_BIND")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8787)))
}

pub fn default_log_filter() -> String {
    format!("{}=info,tower_http=info", env!("CARGO_PKG_NAME"))
}

/// The fixed grid of bookable time slots within opening hours.
///
/// Slots are half-open intervals starting at `opening` in `slot_minutes`
/// increments; the last slot starts `slot_minutes` before `closing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    pub opening: NaiveTime,
    pub closing: NaiveTime,
    pub slot_minutes: u32,
}

impl BusinessHours {
    /// Slot start times in chronological order.
    pub fn slots(&self) -> Vec<NaiveTime> {
        let mut slots = Vec::new();
        let step = chrono::Duration::minutes(self.slot_minutes as i64);
        let mut t = self.opening;
        while t < self.closing {
            slots.push(t);
            t += step;
        }
        slots
    }

    /// Whether `time` falls exactly on a bookable slot boundary.
    pub fn is_valid_slot(&self, time: NaiveTime) -> bool {
        if time < self.opening || time >= self.closing {
            return false;
        }
        let offset = (time - self.opening).num_minutes();
        offset % self.slot_minutes as i64 == 0
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            opening: NaiveTime::from_hms_opt(9, 0, 0).expect("valid opening time"),
            closing: NaiveTime::from_hms_opt(18, 0, 0).expect("valid closing time"),
            slot_minutes: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Navalha"));
    }

    #[test]
    fn default_hours_produce_18_slots() {
        let hours = BusinessHours::default();
        let slots = hours.slots();
        assert_eq!(slots.len(), 18);
        assert_eq!(slots[0], NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(*slots.last().unwrap(), NaiveTime::from_hms_opt(17, 30, 0).unwrap());
    }

    #[test]
    fn slots_are_chronological() {
        let slots = BusinessHours::default().slots();
        for pair in slots.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn valid_slot_boundaries() {
        let hours = BusinessHours::default();
        assert!(hours.is_valid_slot(NaiveTime::from_hms_opt(14, 0, 0).unwrap()));
        assert!(hours.is_valid_slot(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert!(!hours.is_valid_slot(NaiveTime::from_hms_opt(14, 15, 0).unwrap()));
        assert!(!hours.is_valid_slot(NaiveTime::from_hms_opt(8, 30, 0).unwrap()));
        assert!(!hours.is_valid_slot(NaiveTime::from_hms_opt(18, 0, 0).unwrap()));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
