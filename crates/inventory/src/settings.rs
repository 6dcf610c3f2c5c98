use serde::{Deserialize, Serialize};

/// Alert configuration (singleton record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSettings {
    /// Default threshold for dashboard-level aggregates.
    ///
    /// Per-item low stock classification uses `InventoryItem::low_stock_threshold`,
    /// not this value.
    pub low_stock_threshold: i64,
    /// Window (days) for the "expiring soon" classification.
    pub expiration_alert_days: i64,
    pub email_alerts: bool,
    /// Only meaningful when `email_alerts` is set.
    #[serde(default)]
    pub alert_email: Option<String>,
}

impl AlertSettings {
    /// Drops the alert address when email alerts are disabled.
    pub fn normalized(mut self) -> Self {
        if !self.email_alerts {
            self.alert_email = None;
        }
        self
    }
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
            expiration_alert_days: 30,
            email_alerts: false,
            alert_email: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = AlertSettings::default();
        assert_eq!(s.low_stock_threshold, 10);
        assert_eq!(s.expiration_alert_days, 30);
        assert!(!s.email_alerts);
        assert_eq!(s.alert_email, None);
    }

    #[test]
    fn normalized_clears_email_when_alerts_disabled() {
        let s = AlertSettings {
            alert_email: Some("pharmacy@example.com".to_string()),
            ..AlertSettings::default()
        };
        assert_eq!(s.normalized().alert_email, None);

        let s = AlertSettings {
            email_alerts: true,
            alert_email: Some("pharmacy@example.com".to_string()),
            ..AlertSettings::default()
        };
        assert_eq!(
            s.normalized().alert_email.as_deref(),
            Some("pharmacy@example.com")
        );
    }

    #[test]
    fn reads_camel_case_settings_document() {
        let raw = r#"{"lowStockThreshold":10,"expirationAlertDays":30,"emailAlerts":false,"alertEmail":""}"#;
        let s: AlertSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(s.expiration_alert_days, 30);
        assert_eq!(s.alert_email.as_deref(), Some(""));
    }
}
