// device.rs
// Device profile selection: desktop vs. constrained (mobile) hosts

use serde::{Deserialize, Serialize};

/// User-agent tokens that mark a host as a constrained (mobile) device.
const MOBILE_TOKENS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Narrow constrained hosts skip the animation entirely below this width.
pub const STATIC_FALLBACK_WIDTH: f32 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceProfile {
    #[default]
    Desktop,
    Constrained,
}

impl DeviceProfile {
    /// Classify a host from its user-agent string (case-insensitive).
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if MOBILE_TOKENS.iter().any(|token| ua.contains(token)) {
            DeviceProfile::Constrained
        } else {
            DeviceProfile::Desktop
        }
    }

    pub fn is_constrained(self) -> bool {
        self == DeviceProfile::Constrained
    }

    /// Constrained hosts narrower than [`STATIC_FALLBACK_WIDTH`] show a static
    /// backdrop instead of the canvas.
    pub fn uses_static_fallback(self, surface_width: f32) -> bool {
        self.is_constrained() && surface_width < STATIC_FALLBACK_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_user_agents_are_constrained() {
        let agents = [
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
            "Mozilla/5.0 (Linux; Android 14; Pixel 8)",
            "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)",
            "Mozilla/5.0 (compatible; MSIE 10.0; Windows Phone 8.0; IEMobile/10.0)",
        ];
        for ua in agents {
            assert_eq!(DeviceProfile::from_user_agent(ua), DeviceProfile::Constrained, "{ua}");
        }
    }

    #[test]
    fn desktop_user_agent_is_desktop() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
        assert_eq!(DeviceProfile::from_user_agent(ua), DeviceProfile::Desktop);
    }

    #[test]
    fn static_fallback_only_for_narrow_constrained() {
        assert!(DeviceProfile::Constrained.uses_static_fallback(400.0));
        assert!(!DeviceProfile::Constrained.uses_static_fallback(1024.0));
        assert!(!DeviceProfile::Desktop.uses_static_fallback(400.0));
    }
}
