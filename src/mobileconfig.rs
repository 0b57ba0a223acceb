//! Configuration-profile assembly.
//!
//! A [`MobileConfig`] models an Apple `.mobileconfig` profile: a
//! top-level payload plus an array of payload contents, of which the
//! Wi-Fi payload (`com.apple.wifi.managed`) is the one this crate
//! builds. [`MobileConfig::from_credential`] produces a ready-to-install
//! profile from a parsed [`WiFiCredential`];
//! [`MobileConfig::generate_plist`] lowers any profile to a
//! [`PlistDocument`] for XML serialization.
//!
//! Optional profile features beyond the credential itself (proxy
//! settings, QoS marking, captive-portal bypass, auto-removal) are
//! modeled but left unset by `from_credential`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::credential::{EncryptionType, Password, Ssid, WiFiCredential};
use crate::dict::PlistDict;
use crate::value::{PlistDocument, PlistValue};

/// MIME type a server must use when delivering a profile so that iOS
/// offers to install it.
pub const MOBILE_CONFIG_MIME_TYPE: &str = "application/x-apple-aspen-config";

mod top_level_key {
    pub const CONTENT: &str = "PayloadContent";
    pub const DESCRIPTION: &str = "PayloadDescription";
    pub const DISPLAY_NAME: &str = "PayloadDisplayName";
    pub const EXPIRATION_DATE: &str = "PayloadExpirationDate";
    pub const IDENTIFIER: &str = "PayloadIdentifier";
    pub const ORGANIZATION: &str = "PayloadOrganization";
    pub const UUID: &str = "PayloadUUID";
    pub const REMOVAL_DISALLOWED: &str = "PayloadRemovalDisallowed";
    pub const TYPE: &str = "PayloadType";
    pub const VERSION: &str = "PayloadVersion";
    pub const SCOPE: &str = "PayloadScope";
    pub const REMOVAL_DATE: &str = "RemovalDate";
    pub const DURATION_UNTIL_REMOVAL: &str = "DurationUntilRemoval";
    pub const CONSENT_TEXT: &str = "ConsentText";
}

mod wifi_key {
    pub const SSID: &str = "SSID_STR";
    pub const HIDDEN_NETWORK: &str = "HIDDEN_NETWORK";
    pub const AUTO_JOIN: &str = "AutoJoin";
    pub const ENCRYPTION_TYPE: &str = "EncryptionType";
    pub const PASSWORD: &str = "Password";
    pub const IS_HOTSPOT: &str = "IsHotspot";
    pub const PROXY_TYPE: &str = "ProxyType";
    pub const CAPTIVE_BYPASS: &str = "CaptiveBypass";
    pub const QOS_MARKING_POLICY: &str = "QoSMarkingPolicy";
}

mod proxy_key {
    pub const SERVER: &str = "ProxyServer";
    pub const SERVER_PORT: &str = "ProxyServerPort";
    pub const USERNAME: &str = "ProxyUsername";
    pub const PASSWORD: &str = "ProxyPassword";
    pub const PAC_URL: &str = "ProxyPACURL";
    pub const PAC_FALLBACK_ALLOWED: &str = "ProxyPACFallbackAllowed";
}

mod qos_key {
    pub const WHITELISTED_APP_IDENTIFIERS: &str = "QoSMarkingWhitelistedAppIdentifiers";
    pub const APPLE_AUDIO_VIDEO_CALLS: &str = "QoSMarkingAppleAudioVideoCalls";
    pub const ENABLED: &str = "QoSMarkingEnabled";
}

/// The `PayloadType` of a profile or payload dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PayloadType {
    /// The enclosing profile. The only value Apple supports at the top level.
    Configuration,
    /// A Wi-Fi payload, `com.apple.wifi.managed`.
    WiFi,
}

impl PayloadType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PayloadType::Configuration => "Configuration",
            PayloadType::WiFi => "com.apple.wifi.managed",
        }
    }
}

/// The profile format version. Currently always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PayloadVersion(pub i64);

impl Default for PayloadVersion {
    fn default() -> Self {
        PayloadVersion(1)
    }
}

/// Reverse-DNS style identifier that decides whether a new profile
/// replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadIdentifier(String);

impl PayloadIdentifier {
    pub fn new(text: impl Into<String>) -> Self {
        PayloadIdentifier(text.into())
    }

    /// `<payload type>.<UUID>`, the conventional identifier for a
    /// generated payload.
    #[must_use]
    pub fn from_uuid(uuid: &Uuid, payload_type: PayloadType) -> Self {
        PayloadIdentifier(format!(
            "{}.{}",
            payload_type.as_str(),
            uuid_text(uuid)
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Human-readable profile name shown on the install screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(text: impl Into<String>) -> Self {
        DisplayName(text.into())
    }

    /// Default display name Apple Configurator uses for Wi-Fi payloads.
    #[must_use]
    pub fn wifi() -> Self {
        DisplayName("Wi-Fi".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Name of the organization that provided the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationName(String);

impl OrganizationName {
    pub fn new(text: impl Into<String>) -> Self {
        OrganizationName(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether the profile installs for the system or the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadScope {
    System,
    User,
}

impl PayloadScope {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PayloadScope::System => "System",
            PayloadScope::User => "User",
        }
    }
}

/// Automatic profile removal: either at a fixed date or after a number
/// of seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutoRemoval {
    At(DateTime<Utc>),
    AfterSeconds(f32),
}

/// Localized consent text shown before installation, keyed by IETF BCP
/// 47 language identifier (plus the special key `default`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsentText {
    localized: IndexMap<String, String>,
}

impl ConsentText {
    #[must_use]
    pub fn new() -> Self {
        ConsentText::default()
    }

    pub fn insert(&mut self, language: impl Into<String>, text: impl Into<String>) {
        self.localized.insert(language.into(), text.into());
    }

    fn to_plist_value(&self) -> PlistValue {
        let dict: PlistDict = self
            .localized
            .iter()
            .map(|(language, text)| (language.clone(), PlistValue::from(text.as_str())))
            .collect();
        PlistValue::Dict(dict)
    }
}

/// `EncryptionType` values a Wi-Fi payload accepts. Unlike the MeCard
/// side, profiles distinguish WPA from WPA2 and support `Any`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadEncryption {
    None,
    Wep(Password),
    Wpa(Password),
    Wpa2(Password),
    Any(Option<Password>),
}

impl PayloadEncryption {
    fn write_into(&self, dict: &mut PlistDict) {
        let (label, password) = match self {
            PayloadEncryption::None => ("None", None),
            PayloadEncryption::Wep(password) => ("WEP", Some(password)),
            PayloadEncryption::Wpa(password) => ("WPA", Some(password)),
            PayloadEncryption::Wpa2(password) => ("WPA2", Some(password)),
            PayloadEncryption::Any(password) => ("Any", password.as_ref()),
        };
        dict.insert(wifi_key::ENCRYPTION_TYPE, label);
        if let Some(password) = password {
            dict.insert(wifi_key::PASSWORD, password.as_str());
        }
    }
}

/// Hotspot handling for the network. Passpoint is not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotType {
    Legacy,
}

/// Proxy settings for the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyConfiguration {
    None,
    Manual(ManualProxy),
    Auto(AutoProxy),
}

impl ProxyConfiguration {
    fn write_into(&self, dict: &mut PlistDict) {
        match self {
            ProxyConfiguration::None => {
                dict.insert(wifi_key::PROXY_TYPE, "None");
            }
            ProxyConfiguration::Manual(manual) => {
                dict.insert(wifi_key::PROXY_TYPE, "Manual");
                dict.insert(proxy_key::SERVER, manual.server.as_str());
                dict.insert(proxy_key::SERVER_PORT, manual.port);
                if let Some(authentication) = &manual.authentication {
                    dict.insert(proxy_key::USERNAME, authentication.username.as_str());
                    dict.insert(proxy_key::PASSWORD, authentication.password.as_str());
                }
            }
            ProxyConfiguration::Auto(auto) => {
                dict.insert(wifi_key::PROXY_TYPE, "Auto");
                dict.insert(proxy_key::PAC_URL, auto.pac_url.as_str());
                if let Some(allowed) = auto.pac_fallback_allowed {
                    dict.insert(proxy_key::PAC_FALLBACK_ALLOWED, allowed);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualProxy {
    pub server: String,
    pub port: i64,
    pub authentication: Option<ProxyAuthentication>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyAuthentication {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoProxy {
    pub pac_url: String,
    pub pac_fallback_allowed: Option<bool>,
}

/// Cisco QoS fast-lane marking policy for the network.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QosMarkingPolicy {
    pub whitelisted_app_identifiers: Vec<String>,
    pub apple_audio_video_calls: Option<bool>,
    pub enabled: Option<bool>,
}

impl QosMarkingPolicy {
    fn to_plist_value(&self) -> PlistValue {
        let mut dict = PlistDict::new();
        if !self.whitelisted_app_identifiers.is_empty() {
            let identifiers: Vec<PlistValue> = self
                .whitelisted_app_identifiers
                .iter()
                .map(|id| PlistValue::from(id.as_str()))
                .collect();
            dict.insert(qos_key::WHITELISTED_APP_IDENTIFIERS, identifiers);
        }
        if let Some(allowed) = self.apple_audio_video_calls {
            dict.insert(qos_key::APPLE_AUDIO_VIDEO_CALLS, allowed);
        }
        if let Some(enabled) = self.enabled {
            dict.insert(qos_key::ENABLED, enabled);
        }
        PlistValue::Dict(dict)
    }
}

/// One `com.apple.wifi.managed` payload dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct WiFiPayload {
    pub version: PayloadVersion,
    pub identifier: PayloadIdentifier,
    pub uuid: Uuid,
    pub display_name: DisplayName,
    pub description: Option<String>,
    pub organization: Option<OrganizationName>,
    pub ssid: Ssid,
    pub hidden_network: bool,
    pub auto_join: Option<bool>,
    pub encryption: PayloadEncryption,
    pub hotspot: Option<HotspotType>,
    pub proxy: Option<ProxyConfiguration>,
    pub captive_bypass: Option<bool>,
    pub qos_marking_policy: Option<QosMarkingPolicy>,
}

impl WiFiPayload {
    fn to_plist_value(&self) -> PlistValue {
        let mut dict = PlistDict::new();
        dict.insert(top_level_key::TYPE, PayloadType::WiFi.as_str());
        dict.insert(top_level_key::VERSION, self.version.0);
        dict.insert(top_level_key::IDENTIFIER, self.identifier.as_str());
        dict.insert(top_level_key::UUID, uuid_text(&self.uuid));
        dict.insert(top_level_key::DISPLAY_NAME, self.display_name.as_str());

        if let Some(description) = &self.description {
            dict.insert(top_level_key::DESCRIPTION, description.as_str());
        }
        if let Some(organization) = &self.organization {
            dict.insert(top_level_key::ORGANIZATION, organization.as_str());
        }

        dict.insert(wifi_key::SSID, self.ssid.as_str());
        dict.insert(wifi_key::HIDDEN_NETWORK, self.hidden_network);

        if let Some(auto_join) = self.auto_join {
            dict.insert(wifi_key::AUTO_JOIN, auto_join);
        }

        self.encryption.write_into(&mut dict);

        if let Some(HotspotType::Legacy) = self.hotspot {
            dict.insert(wifi_key::IS_HOTSPOT, true);
        }
        if let Some(proxy) = &self.proxy {
            proxy.write_into(&mut dict);
        }
        if let Some(bypass) = self.captive_bypass {
            dict.insert(wifi_key::CAPTIVE_BYPASS, bypass);
        }
        if let Some(policy) = &self.qos_marking_policy {
            dict.insert(wifi_key::QOS_MARKING_POLICY, policy.to_plist_value());
        }

        PlistValue::Dict(dict)
    }
}

/// A payload dictionary inside `PayloadContent`.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadContent {
    WiFi(WiFiPayload),
}

impl PayloadContent {
    #[must_use]
    pub fn payload_type(&self) -> PayloadType {
        match self {
            PayloadContent::WiFi(_) => PayloadType::WiFi,
        }
    }

    fn to_plist_value(&self) -> PlistValue {
        match self {
            PayloadContent::WiFi(payload) => payload.to_plist_value(),
        }
    }
}

/// A complete configuration profile.
#[derive(Debug, Clone, PartialEq)]
pub struct MobileConfig {
    pub contents: Vec<PayloadContent>,
    pub description: Option<String>,
    pub display_name: Option<DisplayName>,
    pub expiration: Option<DateTime<Utc>>,
    pub identifier: PayloadIdentifier,
    pub organization: Option<OrganizationName>,
    pub uuid: Uuid,
    pub removal_disallowed: Option<bool>,
    pub scope: Option<PayloadScope>,
    pub auto_removal: Option<AutoRemoval>,
    pub consent_text: Option<ConsentText>,
}

impl MobileConfig {
    /// Builds an installable Wi-Fi profile from a parsed credential.
    ///
    /// The MeCard `WPA` type is deliberately widened to the profile
    /// `WPA2` value: in configuration profiles `WPA` means WPA only,
    /// while `WPA2` covers both, which is what a QR code intends.
    #[must_use]
    pub fn from_credential(credential: &WiFiCredential, organization: OrganizationName) -> Self {
        let wifi_uuid = Uuid::new_v4();
        let encryption = match credential.encryption() {
            EncryptionType::None => PayloadEncryption::None,
            EncryptionType::Wep(password) => PayloadEncryption::Wep(password.clone()),
            EncryptionType::Wpa(password) => PayloadEncryption::Wpa2(password.clone()),
        };

        MobileConfig {
            contents: vec![PayloadContent::WiFi(WiFiPayload {
                version: PayloadVersion::default(),
                identifier: PayloadIdentifier::from_uuid(&wifi_uuid, PayloadType::WiFi),
                uuid: wifi_uuid,
                display_name: DisplayName::wifi(),
                description: Some("Configures Wi-Fi settings".to_string()),
                organization: Some(organization.clone()),
                ssid: credential.ssid().clone(),
                hidden_network: credential.is_hidden(),
                auto_join: Some(true),
                encryption,
                hotspot: None,
                proxy: None,
                captive_bypass: None,
                qos_marking_policy: None,
            })],
            description: Some("Configures Wi-Fi settings".to_string()),
            display_name: Some(DisplayName::wifi()),
            expiration: None,
            identifier: PayloadIdentifier::new(credential.ssid().as_str()),
            organization: Some(organization),
            uuid: Uuid::new_v4(),
            removal_disallowed: Some(false),
            scope: None,
            auto_removal: None,
            consent_text: None,
        }
    }

    /// Lowers the profile to a plist document ready for XML
    /// serialization.
    ///
    /// `PayloadContent` is emitted only when at least one payload is
    /// present, with payloads ordered by descending payload type so the
    /// output is stable.
    #[must_use]
    pub fn generate_plist(&self) -> PlistDocument {
        let mut root = PlistDict::new();

        if !self.contents.is_empty() {
            let mut contents = self.contents.clone();
            contents.sort_by(|a, b| b.payload_type().cmp(&a.payload_type()));
            let payloads: Vec<PlistValue> =
                contents.iter().map(PayloadContent::to_plist_value).collect();
            root.insert(top_level_key::CONTENT, payloads);
        }

        if let Some(description) = &self.description {
            root.insert(top_level_key::DESCRIPTION, description.as_str());
        }
        if let Some(display_name) = &self.display_name {
            root.insert(top_level_key::DISPLAY_NAME, display_name.as_str());
        }
        if let Some(expiration) = self.expiration {
            root.insert(top_level_key::EXPIRATION_DATE, expiration);
        }

        root.insert(top_level_key::IDENTIFIER, self.identifier.as_str());

        if let Some(organization) = &self.organization {
            root.insert(top_level_key::ORGANIZATION, organization.as_str());
        }

        root.insert(top_level_key::UUID, uuid_text(&self.uuid));

        if let Some(disallowed) = self.removal_disallowed {
            root.insert(top_level_key::REMOVAL_DISALLOWED, disallowed);
        }

        root.insert(top_level_key::TYPE, PayloadType::Configuration.as_str());
        root.insert(top_level_key::VERSION, PayloadVersion::default().0);

        if let Some(scope) = self.scope {
            root.insert(top_level_key::SCOPE, scope.as_str());
        }

        match self.auto_removal {
            None => {}
            Some(AutoRemoval::At(date)) => {
                root.insert(top_level_key::REMOVAL_DATE, date);
            }
            Some(AutoRemoval::AfterSeconds(seconds)) => {
                root.insert(top_level_key::DURATION_UNTIL_REMOVAL, seconds);
            }
        }

        if let Some(consent_text) = &self.consent_text {
            root.insert(top_level_key::CONSENT_TEXT, consent_text.to_plist_value());
        }

        PlistDocument::new(root)
    }
}

/// Profile tooling conventionally writes UUIDs in uppercase.
fn uuid_text(uuid: &Uuid) -> String {
    uuid.to_string().to_uppercase()
}
