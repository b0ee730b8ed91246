//! Location matrix - Node history, tracking mode and the global device finder

use std::time::Instant;

use tracing::warn;

use super::timer::Delay;

/// Finder lookup latency
pub const LOOKUP_DELAY_MS: u64 = 3000;

/// Operator position as `"lat,lng"` in decimal degrees
pub const OPERATOR_POSITION_VAR: &str = "DUPLEX_OPERATOR_POSITION";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Used whenever the operator position is unknown
    pub const FALLBACK: Coordinates = Coordinates {
        lat: 34.0522,
        lng: -118.2437,
    };

    /// Parse `"lat,lng"`; out-of-range values are rejected
    pub fn parse(text: &str) -> Option<Coordinates> {
        let (lat, lng) = text.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;
        ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng))
            .then_some(Coordinates { lat, lng })
    }

    /// Operator position from [`OPERATOR_POSITION_VAR`], if set and valid
    pub fn operator_from_env() -> Option<Coordinates> {
        let raw = std::env::var(OPERATOR_POSITION_VAR).ok()?;
        let coords = Self::parse(&raw);
        if coords.is_none() {
            warn!("Ignoring {}='{}', expected \"lat,lng\"", OPERATOR_POSITION_VAR, raw);
        }
        coords
    }

    /// e.g. "34.0522° N, 118.2437° W"
    pub fn display(&self) -> String {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lng >= 0.0 { 'E' } else { 'W' };
        format!(
            "{:.4}° {}, {:.4}° {}",
            self.lat.abs(),
            ns,
            self.lng.abs(),
            ew
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationPing {
    pub time: &'static str,
    pub coords: Coordinates,
    pub label: &'static str,
}

pub fn location_history() -> Vec<LocationPing> {
    vec![
        LocationPing {
            time: "10:45 AM",
            coords: Coordinates {
                lat: 34.0522,
                lng: -118.2437,
            },
            label: "Primary Node",
        },
        LocationPing {
            time: "11:30 AM",
            coords: Coordinates {
                lat: 34.0736,
                lng: -118.4004,
            },
            label: "Gateway 7",
        },
        LocationPing {
            time: "12:15 PM",
            coords: Coordinates {
                lat: 34.0195,
                lng: -118.4912,
            },
            label: "Mobile Mesh",
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingMode {
    #[default]
    Target,
    Operator,
}

impl TrackingMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Target => "Target",
            Self::Operator => "Operator",
        }
    }
}

/// View state for the location matrix
#[derive(Debug, Clone)]
pub struct LocationMatrix {
    pub history: Vec<LocationPing>,
    pub show_heatmap: bool,
    pub mode: TrackingMode,
    /// Operator position, when one has been fixed
    pub operator_coords: Option<Coordinates>,
}

impl Default for LocationMatrix {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LocationMatrix {
    pub fn new(operator_coords: Option<Coordinates>) -> Self {
        Self {
            history: location_history(),
            show_heatmap: false,
            mode: TrackingMode::Target,
            operator_coords,
        }
    }

    /// Coordinates sent with a repair-shop query
    pub fn support_coords(&self) -> Coordinates {
        self.operator_coords.unwrap_or(Coordinates::FALLBACK)
    }

    pub fn toggle_heatmap(&mut self) {
        self.show_heatmap = !self.show_heatmap;
    }

    /// The last known target position
    pub fn latest_target(&self) -> Option<&LocationPing> {
        self.history.last()
    }
}

/// What the finder reports for a located handset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderResult {
    pub status: &'static str,
    pub model: &'static str,
    pub last_seen: &'static str,
    pub location: &'static str,
    pub carrier: &'static str,
    pub network_state: &'static str,
    pub signal_strength: &'static str,
}

fn located_device() -> FinderResult {
    FinderResult {
        status: "Active",
        model: "iPhone 15 Pro",
        last_seen: "2 minutes ago",
        location: "New York, USA",
        carrier: "Verizon Wireless",
        network_state: "5G UW",
        signal_strength: "-85 dBm",
    }
}

/// Lookup by phone number or email address
#[derive(Debug, Default)]
pub struct DeviceFinder {
    pending: Option<Delay>,
    result: Option<FinderResult>,
}

impl DeviceFinder {
    /// Start a lookup. Blank queries are ignored.
    pub fn search(&mut self, query: &str, now: Instant) -> bool {
        if query.trim().is_empty() || self.pending.is_some() {
            return false;
        }
        self.result = None;
        self.pending = Some(Delay::from_millis(now, LOOKUP_DELAY_MS));
        true
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn result(&self) -> Option<&FinderResult> {
        self.result.as_ref()
    }

    pub fn poll(&mut self, now: Instant) {
        if self.pending.is_some_and(|d| d.is_due(now)) {
            self.pending = None;
            self.result = Some(located_device());
        }
    }
}

/// Whether a finder query looks like an email rather than a number
pub fn is_email_query(query: &str) -> bool {
    query.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn support_query_falls_back_to_los_angeles() {
        let matrix = LocationMatrix::default();
        assert_eq!(matrix.support_coords(), Coordinates::FALLBACK);

        let fix = Coordinates::parse("51.5, -0.12");
        let matrix = LocationMatrix::new(fix);
        assert_eq!(matrix.support_coords(), Coordinates { lat: 51.5, lng: -0.12 });
    }

    #[test]
    fn operator_position_parsing() {
        assert_eq!(
            Coordinates::parse("-33.8688,151.2093"),
            Some(Coordinates { lat: -33.8688, lng: 151.2093 })
        );
        assert_eq!(Coordinates::parse("91.0,0"), None);
        assert_eq!(Coordinates::parse("10,-181"), None);
        assert_eq!(Coordinates::parse("north,east"), None);
        assert_eq!(Coordinates::parse("34.05"), None);
    }

    #[test]
    fn history_has_three_points() {
        let matrix = LocationMatrix::default();
        assert_eq!(matrix.history.len(), 3);
        assert_eq!(matrix.latest_target().unwrap().label, "Mobile Mesh");
        assert_eq!(
            matrix.history[0].coords.display(),
            "34.0522° N, 118.2437° W"
        );
    }

    #[test]
    fn finder_ignores_blank_query() {
        let mut finder = DeviceFinder::default();
        assert!(!finder.search("   ", Instant::now()));
        assert!(!finder.is_searching());
    }

    #[test]
    fn finder_reports_fixed_device_after_delay() {
        let start = Instant::now();
        let mut finder = DeviceFinder::default();
        assert!(finder.search("+1 555 0100", start));

        finder.poll(start + Duration::from_millis(2999));
        assert!(finder.result().is_none());

        finder.poll(start + Duration::from_millis(LOOKUP_DELAY_MS));
        let result = finder.result().unwrap();
        assert_eq!(result.model, "iPhone 15 Pro");
        assert_eq!(result.carrier, "Verizon Wireless");
    }
}
