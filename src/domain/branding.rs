use crate::app_config::AppConfig;
use crate::validation::hex_color;
use serde::Deserialize;

/// Branding as sent by the settings endpoint; every field may be missing.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct BrandingPayload {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Branding {
    pub company_name: String,
    pub logo_url: Option<String>,
    pub accent_color: String,
}

impl Branding {
    pub fn from_payload(payload: BrandingPayload, config: &AppConfig) -> Self {
        let company_name = payload
            .company_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| config.branding().default_name().to_string());
        let accent_color = payload
            .accent_color
            .filter(|color| hex_color("accent_color", color).is_ok())
            .unwrap_or_else(|| config.branding().default_accent_color().to_string());

        Branding {
            company_name,
            logo_url: payload.logo_url.filter(|url| !url.trim().is_empty()),
            accent_color,
        }
    }

    pub fn defaults(config: &AppConfig) -> Self {
        Branding::from_payload(BrandingPayload::default(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_payload_keeps_valid_values() {
        let config = AppConfigBuilder::new().build();
        let payload = BrandingPayload {
            company_name: Some("Acme Service".to_string()),
            logo_url: Some("https://cdn.acme.io/logo.png".to_string()),
            accent_color: Some("#ff6600".to_string()),
        };

        let branding = Branding::from_payload(payload, &config);

        assert_eq!(branding.company_name, "Acme Service");
        assert_eq!(branding.accent_color, "#ff6600");
        assert_eq!(branding.logo_url.as_deref(), Some("https://cdn.acme.io/logo.png"));
    }

    #[test]
    fn from_payload_falls_back_for_missing_or_invalid_values() {
        let config = AppConfigBuilder::new().build();
        let payload = BrandingPayload {
            company_name: Some(" ".to_string()),
            logo_url: Some(String::new()),
            accent_color: Some("orange".to_string()),
        };

        let branding = Branding::from_payload(payload, &config);

        assert_eq!(branding, Branding::defaults(&config));
        assert_eq!(branding.company_name, "assetdesk");
        assert_eq!(branding.accent_color, "#2563eb");
    }
}
