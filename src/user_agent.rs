//! User-Agent parsing into [`EnvInfo`].

use crate::model::EnvInfo;
use regex::Regex;
use std::sync::OnceLock;

fn comment_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^)]*)\)").ok()).as_ref()
}

fn windows_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Windows NT (\d+\.\d+)").ok()).as_ref()
}

/// Product tokens checked in order; the first hit wins. Edge and Opera
/// also advertise Chrome and Safari, and Chrome also advertises Safari.
const BROWSERS: &[(&str, &str)] = &[
    ("Edg/", "Edge"),
    ("Edge/", "Edge"),
    ("EdgA/", "Edge"),
    ("OPR/", "Opera"),
    ("Opera", "Opera"),
    ("Firefox/", "Firefox"),
    ("FxiOS/", "Firefox"),
    ("CriOS/", "Chrome"),
    ("Chrome/", "Chrome"),
    ("Safari/", "Safari"),
    ("MSIE ", "Internet Explorer"),
    ("Trident/", "Internet Explorer"),
];

impl EnvInfo {
    /// Detect OS and browser. Anything unrecognized stays an empty string.
    pub fn from_user_agent(ua: &str) -> Self {
        let ua = ua.trim();
        if ua.is_empty() {
            return EnvInfo::default();
        }
        EnvInfo {
            os: detect_os(ua),
            browser: detect_browser(ua),
        }
    }
}

fn detect_os(ua: &str) -> String {
    let Some(comment) = comment_re()
        .and_then(|re| re.captures(ua))
        .and_then(|c| c.get(1))
    else {
        return String::new();
    };
    let comment = comment.as_str();

    if let Some(version) = windows_re()
        .and_then(|re| re.captures(comment))
        .and_then(|c| c.get(1))
    {
        return windows_name(version.as_str());
    }

    let tokens: Vec<&str> = comment.split(';').map(str::trim).collect();
    let find = |needle: &str| tokens.iter().find(|t| t.contains(needle)).map(|t| t.to_string());

    // Order matters: Android tokens sit next to "Linux", iOS tokens mention "Mac OS X".
    find("iPhone OS")
        .or_else(|| find("CPU OS"))
        .or_else(|| find("Android"))
        .or_else(|| find("Mac OS X"))
        .or_else(|| find("CrOS"))
        .or_else(|| {
            tokens
                .iter()
                .find(|t| t.starts_with("Linux"))
                .map(|t| t.to_string())
        })
        .unwrap_or_default()
}

fn windows_name(nt_version: &str) -> String {
    let name = match nt_version {
        "10.0" => "Windows 10",
        "6.3" => "Windows 8.1",
        "6.2" => "Windows 8",
        "6.1" => "Windows 7",
        "6.0" => "Windows Vista",
        "5.2" => "Windows XP x64 Edition",
        "5.1" => "Windows XP",
        "5.0" => "Windows 2000",
        other => return format!("Windows NT {}", other),
    };
    name.to_string()
}

fn detect_browser(ua: &str) -> String {
    BROWSERS
        .iter()
        .find(|(token, _)| ua.contains(token))
        .map(|(_, name)| name.to_string())
        .unwrap_or_default()
}
