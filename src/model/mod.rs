//! Proxy record model and feed-document normalization.
//!
//! The feed is loosely shaped: an array of record objects, or (some
//! feeds) a flat array of `"ip[:port]"` strings. Individual malformed
//! fields fall back to defaults — a record is never rejected, only a
//! non-array document is.

use serde_json::Value;

/// Latency bucket label derived from `latency_ms`.
///
/// Thresholds: ≤100 Excellent, ≤200 Good, ≤500 Medium, ≤1000 Poor,
/// else Unusable. No latency at all → Unknown.
pub fn speed_category_for(latency_ms: Option<f64>) -> &'static str {
    match latency_ms {
        None => "Unknown",
        Some(ms) if ms <= 100.0 => "Excellent",
        Some(ms) if ms <= 200.0 => "Good",
        Some(ms) if ms <= 500.0 => "Medium",
        Some(ms) if ms <= 1000.0 => "Poor",
        Some(_) => "Unusable",
    }
}

/// One entry of the proxy feed, normalized.
///
/// No identity beyond `ip` (+ `port` where present); duplicates are
/// kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRecord {
    pub ip: String,
    pub port: Option<u16>,
    pub protocol: String,
    pub country: String,
    /// Absent, null or non-numeric in the feed → `None` (displayed as 0).
    pub latency_ms: Option<f64>,
    /// Raw status marker from the feed ("Active", "alive", ...).
    pub status: String,
    pub anonymity: Option<String>,
    /// Stored label when the feed carries one; otherwise derived.
    pub speed_category: Option<String>,
}

impl ProxyRecord {
    /// Case-insensitive health test against the "active"/"alive" markers.
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active") || self.status.eq_ignore_ascii_case("alive")
    }

    /// The speed label to filter and display on: stored, or derived
    /// from latency.
    pub fn effective_speed(&self) -> &str {
        match &self.speed_category {
            Some(label) if !label.is_empty() => label,
            _ => speed_category_for(self.latency_ms),
        }
    }

    /// Latency for display; missing latency is coerced to 0.
    pub fn display_latency(&self) -> f64 {
        self.latency_ms.unwrap_or(0.0)
    }

    /// `protocol://ip[:port]`, the copy/export line format.
    pub fn endpoint_url(&self) -> String {
        let scheme = self.protocol.to_lowercase();
        match self.port {
            Some(port) => format!("{scheme}://{}:{port}", self.ip),
            None => format!("{scheme}://{}", self.ip),
        }
    }

    /// Normalize one feed element. Strings become records with default
    /// fields; objects are read field-by-field with fallbacks.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::from_endpoint_str(s),
            Value::Object(map) => {
                let str_field = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .filter(|s| !s.is_empty())
                };
                Self {
                    ip: str_field("ip").unwrap_or_default(),
                    port: map
                        .get("port")
                        .and_then(Value::as_u64)
                        .and_then(|p| u16::try_from(p).ok()),
                    protocol: str_field("protocol").unwrap_or_else(|| "Unknown".into()),
                    country: str_field("country").unwrap_or_else(|| "Unknown".into()),
                    latency_ms: map.get("latency_ms").and_then(Value::as_f64),
                    status: str_field("status").unwrap_or_else(|| "Unknown".into()),
                    anonymity: str_field("anonymity"),
                    speed_category: str_field("speed_category"),
                }
            }
            _ => Self::from_endpoint_str(""),
        }
    }

    /// Parse `"1.2.3.4"`, `"1.2.3.4:8080"` or `"socks5://1.2.3.4:1080"`
    /// into a record with default fields. Flat lists carry no health
    /// info, so entries are presumed active.
    pub fn from_endpoint_str(s: &str) -> Self {
        let (protocol, rest) = match s.split_once("://") {
            Some((scheme, rest)) => (scheme.to_uppercase(), rest),
            None => ("HTTP".to_string(), s),
        };
        let (ip, port) = match rest.rsplit_once(':') {
            Some((host, port_str)) => match port_str.parse::<u16>() {
                Ok(port) => (host.to_string(), Some(port)),
                Err(_) => (rest.to_string(), None),
            },
            None => (rest.to_string(), None),
        };
        Self {
            ip,
            port,
            protocol,
            country: "Unknown".into(),
            latency_ms: None,
            status: "Active".into(),
            anonymity: None,
            speed_category: None,
        }
    }
}

/// Normalize a whole feed document. `None` when the document is not an
/// array at all (the only unrecoverable shape).
pub fn records_from_document(doc: &Value) -> Option<Vec<ProxyRecord>> {
    doc.as_array()
        .map(|items| items.iter().map(ProxyRecord::from_value).collect())
}
