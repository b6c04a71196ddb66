//! Registry of well-known site-setting keys.
//!
//! The settings store itself is an opaque per-tenant `key -> JSON` map;
//! this registry only drives two things:
//!
//! 1. which keys get seeded with which default document when a tenant is
//!    created, and
//! 2. which keys are sensitive and therefore stripped from public reads.
//!
//! Keys absent from the registry are perfectly valid -- they are stored
//! and returned untyped, with public visibility.

use serde_json::{json, Value};

/// One well-known setting key with its seeded default and visibility.
pub struct SettingSpec {
    pub key: &'static str,
    /// `false` for keys that must never appear on public reads.
    pub public: bool,
    /// Default document written at tenant creation.
    pub default: fn() -> Value,
}

/// All well-known keys, iterated at seed time and consulted for filtering.
pub const REGISTRY: &[SettingSpec] = &[
    SettingSpec {
        key: "hero",
        public: true,
        default: default_hero,
    },
    SettingSpec {
        key: "skills",
        public: true,
        default: default_skills,
    },
    SettingSpec {
        key: "skill_categories",
        public: true,
        default: default_skill_categories,
    },
    SettingSpec {
        key: "contact",
        public: true,
        default: default_contact,
    },
    SettingSpec {
        key: "cv",
        public: true,
        default: default_cv,
    },
    SettingSpec {
        key: "footer",
        public: true,
        default: default_footer,
    },
    SettingSpec {
        key: "appearance",
        public: true,
        default: default_appearance,
    },
    SettingSpec {
        key: "integrations",
        public: false,
        default: default_integrations,
    },
];

/// Keys that must be excluded from any public (unauthenticated) read,
/// whether or not they exist in storage.
pub fn sensitive_keys() -> Vec<&'static str> {
    REGISTRY.iter().filter(|s| !s.public).map(|s| s.key).collect()
}

/// Whether a key may appear on public reads. Unknown keys are public.
pub fn is_public_key(key: &str) -> bool {
    REGISTRY
        .iter()
        .find(|s| s.key == key)
        .map(|s| s.public)
        .unwrap_or(true)
}

fn default_hero() -> Value {
    json!({
        "title": "Hi, I'm a",
        "highlight": "Full-Stack Developer",
        "subtitle": "I build modern web applications with clean code and great user experiences.",
        "cta_primary": "View My Work",
        "cta_secondary": "Get in Touch"
    })
}

fn default_skills() -> Value {
    json!([
        { "name": "TypeScript", "category": "Language", "level": 85 },
        { "name": "Python", "category": "Language", "level": 78 },
        { "name": "React", "category": "Frontend", "level": 82 },
        { "name": "Node.js", "category": "Backend", "level": 75 },
        { "name": "PostgreSQL", "category": "Database", "level": 70 },
        { "name": "Docker", "category": "Tools", "level": 70 }
    ])
}

fn default_skill_categories() -> Value {
    json!(["Language", "Frontend", "Backend", "Database", "Tools"])
}

fn default_contact() -> Value {
    json!({
        "heading": "Get in Touch",
        "subheading": "Feel free to reach out for collaborations or just a friendly hello",
        "email": "",
        "github": "",
        "linkedin": "",
        "twitter": "",
        "instagram": "",
        "phone": ""
    })
}

fn default_cv() -> Value {
    json!({
        "enabled": false,
        "pdf_url": null,
        "updated": null
    })
}

fn default_footer() -> Value {
    json!({
        "copyright": "Portfolio. All rights reserved."
    })
}

fn default_appearance() -> Value {
    json!({
        "accent": "#2563eb",
        "background": "#ffffff",
        "text": "#111827",
        "muted": "#6b7280",
        "card": "#f4f4f5",
        "border": "#e4e4e7",
        "dark_mode": false,
        "dark": {
            "accent": "#60a5fa",
            "background": "#0b0f1a",
            "text": "#e5e7eb",
            "muted": "#9ca3af",
            "card": "#111827",
            "border": "#1f2937"
        }
    })
}

fn default_integrations() -> Value {
    json!({
        "analytics": null,
        "blob_storage": null,
        "screenshot_api": null
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrations_is_sensitive() {
        assert!(!is_public_key("integrations"));
        assert!(sensitive_keys().contains(&"integrations"));
    }

    #[test]
    fn test_unknown_keys_default_to_public() {
        assert!(is_public_key("some_future_key"));
    }

    #[test]
    fn test_registry_keys_are_unique() {
        let mut keys: Vec<_> = REGISTRY.iter().map(|s| s.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), REGISTRY.len());
    }

    #[test]
    fn test_defaults_are_objects_or_arrays() {
        for spec in REGISTRY {
            let doc = (spec.default)();
            assert!(
                doc.is_object() || doc.is_array(),
                "default for '{}' should be a JSON document",
                spec.key
            );
        }
    }
}
