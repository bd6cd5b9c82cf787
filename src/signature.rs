//! Component identity.
//!
//! A capture's signature is built from structural attributes only, so the same
//! on-page element captured on another page or in another session hashes to
//! the same [`ComponentKey`]. Collisions are not resolved: two distinct
//! signatures sharing a SHA-1 would merge into one component.

use sha1::{Digest, Sha1};

use crate::config::IdentityConfig;
use crate::types::{ComponentKey, KeyedCapture, RawCapture};

/// Normalized identity attributes of one capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub tag: String,
    pub role: String,
    pub name: String,
    pub path: String,
    pub classes: Vec<String>,
    /// Lowercased `(name, value)` pairs, sorted. Names differing only in case
    /// stay as separate entries.
    pub attributes: Vec<(String, String)>,
}

impl Signature {
    pub fn is_empty(&self) -> bool {
        self == &Signature::default()
    }

    /// Fixed-order encoding that is hashed into the key.
    ///
    /// Every field, class, attribute name and value is length-prefixed
    /// (`{len}:{text}`), so no choice of separator characters inside a value
    /// can make two different signatures encode the same way.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (field, value) in [
            ("tag", &self.tag),
            ("role", &self.role),
            ("name", &self.name),
            ("path", &self.path),
        ] {
            push_field(&mut out, field, value);
        }
        out.push_str(&format!("class#{}", self.classes.len()));
        for class in &self.classes {
            push_part(&mut out, class);
        }
        out.push_str(&format!("|attr#{}", self.attributes.len()));
        for (key, value) in &self.attributes {
            push_part(&mut out, key);
            push_part(&mut out, value);
        }
        out
    }
}

fn push_part(out: &mut String, text: &str) {
    out.push_str(&format!("{}:{}", text.len(), text));
}

fn push_field(out: &mut String, field: &str, value: &str) {
    out.push_str(field);
    out.push('=');
    push_part(out, value);
    out.push('|');
}

pub fn compute_signature(capture: &RawCapture, config: &IdentityConfig) -> Signature {
    let identity = &capture.identity;
    let lower = |v: &Option<String>| v.as_deref().unwrap_or("").trim().to_lowercase();

    let name = if config.include_accessible_name {
        collapse_whitespace(identity.accessible_name.as_deref().unwrap_or("")).to_lowercase()
    } else {
        String::new()
    };

    let mut classes: Vec<String> = identity
        .classes
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    classes.sort();
    classes.dedup();

    let mut attributes: Vec<(String, String)> = identity
        .attributes
        .iter()
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty() && !config.is_volatile(k))
        .collect();
    attributes.sort();

    Signature {
        tag: lower(&identity.tag_name),
        role: lower(&identity.role),
        name,
        path: identity
            .structural_path
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string(),
        classes,
        attributes,
    }
}

pub fn hash_signature(signature: &Signature) -> ComponentKey {
    let mut hasher = Sha1::new();
    hasher.update(signature.canonical().as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn component_key(capture: &RawCapture, config: &IdentityConfig) -> ComponentKey {
    let signature = compute_signature(capture, config);
    if signature.is_empty() {
        log::debug!(
            "capture {} has no identity attributes; grouping with other unknown elements",
            capture.id
        );
    }
    hash_signature(&signature)
}

/// Key every capture once. Returns owned keys alongside the capture order.
pub fn assign_keys(captures: &[RawCapture], config: &IdentityConfig) -> Vec<ComponentKey> {
    captures.iter().map(|c| component_key(c, config)).collect()
}

/// Pair captures with keys produced by [`assign_keys`].
pub fn keyed<'a>(captures: &'a [RawCapture], keys: &'a [ComponentKey]) -> Vec<KeyedCapture<'a>> {
    captures
        .iter()
        .zip(keys)
        .map(|(capture, key)| KeyedCapture {
            key: key.as_str(),
            capture,
        })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdentityAttributes;
    use std::collections::BTreeMap;

    fn capture(id: &str, identity: IdentityAttributes) -> RawCapture {
        RawCapture {
            id: id.to_string(),
            url: None,
            created_at: 0,
            screenshot_blob_id: None,
            dom_snapshot: None,
            identity,
            styles: Default::default(),
        }
    }

    fn button(name: &str) -> IdentityAttributes {
        IdentityAttributes {
            tag_name: Some("BUTTON".to_string()),
            role: Some("button".to_string()),
            accessible_name: Some(name.to_string()),
            structural_path: Some("main > form > button".to_string()),
            classes: vec!["btn".to_string(), "btn-primary".to_string()],
            attributes: BTreeMap::from([("type".to_string(), "submit".to_string())]),
        }
    }

    #[test]
    fn identical_identity_hashes_identically_across_captures() {
        let config = IdentityConfig::default();
        let mut a = capture("a", button("Submit"));
        a.url = Some("https://one.dev".to_string());
        a.created_at = 1;
        let mut b = capture("b", button("Submit"));
        b.url = Some("https://two.dev".to_string());
        b.created_at = 99;
        b.screenshot_blob_id = Some("blob-2".to_string());

        assert_eq!(component_key(&a, &config), component_key(&b, &config));
    }

    #[test]
    fn class_order_whitespace_and_case_do_not_matter() {
        let config = IdentityConfig::default();
        let a = capture("a", button("Submit  order"));
        let mut identity = button("submit order");
        identity.classes = vec!["btn-primary".to_string(), " btn".to_string(), "btn".to_string()];
        identity.tag_name = Some("button".to_string());
        let b = capture("b", identity);

        assert_eq!(component_key(&a, &config), component_key(&b, &config));
    }

    #[test]
    fn volatile_attributes_are_ignored() {
        let config = IdentityConfig::default();
        let a = capture("a", button("Submit"));
        let mut identity = button("Submit");
        identity
            .attributes
            .insert("aria-expanded".to_string(), "true".to_string());
        identity
            .attributes
            .insert("style".to_string(), "color: red".to_string());
        let b = capture("b", identity);

        assert_eq!(component_key(&a, &config), component_key(&b, &config));
    }

    #[test]
    fn distinct_elements_get_distinct_keys() {
        let config = IdentityConfig::default();
        let a = capture("a", button("Submit"));
        let b = capture("b", button("Cancel"));
        let mut link = button("Submit");
        link.tag_name = Some("a".to_string());
        let c = capture("c", link);

        let keys = assign_keys(&[a, b, c], &config);
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[0], keys[2]);
        assert_ne!(keys[1], keys[2]);
    }

    #[test]
    fn accessible_name_can_be_excluded() {
        let config = IdentityConfig {
            include_accessible_name: false,
            ..IdentityConfig::default()
        };
        let a = capture("a", button("Submit"));
        let b = capture("b", button("Cancel"));

        assert_eq!(component_key(&a, &config), component_key(&b, &config));
    }

    #[test]
    fn empty_identity_still_hashes_to_fixed_format() {
        let config = IdentityConfig::default();
        let a = capture("a", IdentityAttributes::default());
        let b = capture("b", IdentityAttributes::default());
        let key = component_key(&a, &config);

        assert_eq!(key.len(), 40);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(key, component_key(&b, &config));
    }

    #[test]
    fn keyed_pairs_captures_in_input_order() {
        let config = IdentityConfig::default();
        let captures = vec![capture("a", button("A")), capture("b", button("B"))];
        let keys = assign_keys(&captures, &config);
        let pairs = keyed(&captures, &keys);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].capture.id, "a");
        assert_eq!(pairs[1].key, keys[1]);
    }
    #[test]
    fn separators_inside_values_do_not_merge_identities() {
        let config = IdentityConfig::default();
        let mut dotted = IdentityAttributes::default();
        dotted.classes = vec!["a.b".to_string()];
        let mut split = IdentityAttributes::default();
        split.classes = vec!["a".to_string(), "b".to_string()];
        assert_ne!(
            component_key(&capture("a", dotted), &config),
            component_key(&capture("b", split), &config)
        );

        let mut packed = IdentityAttributes::default();
        packed.attributes =
            BTreeMap::from([("data-x".to_string(), "1;data-y=2".to_string())]);
        let mut separate = IdentityAttributes::default();
        separate.attributes = BTreeMap::from([
            ("data-x".to_string(), "1".to_string()),
            ("data-y".to_string(), "2".to_string()),
        ]);
        assert_ne!(
            component_key(&capture("c", packed), &config),
            component_key(&capture("d", separate), &config)
        );
    }

    #[test]
    fn attribute_names_differing_in_case_are_both_kept() {
        let config = IdentityConfig::default();
        let mut identity = IdentityAttributes::default();
        identity.attributes = BTreeMap::from([
            ("Type".to_string(), "submit".to_string()),
            ("type".to_string(), "button".to_string()),
        ]);
        let signature = compute_signature(&capture("a", identity), &config);

        assert_eq!(
            signature.attributes,
            vec![
                ("type".to_string(), "button".to_string()),
                ("type".to_string(), "submit".to_string()),
            ]
        );
    }

    #[test]
    fn volatile_check_applies_to_mixed_case_names() {
        let config = IdentityConfig::default();
        let mut identity = IdentityAttributes::default();
        identity
            .attributes
            .insert("Aria-Expanded".to_string(), "true".to_string());
        let signature = compute_signature(&capture("a", identity), &config);

        assert!(signature.attributes.is_empty());
    }
}
