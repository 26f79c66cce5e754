//! Bilingual keyword tables shared by table classification and row normalization.
//!
//! Matching is plain substring search over the space-joined header labels,
//! case-sensitive and not word-bounded. The short token `"on"` in
//! [`EVENT_KEYWORDS`] therefore also fires inside longer English words such
//! as "Description"; this is kept deliberately so classification stays
//! compatible with the corpus already exported from the site.

/// Header fragments that mark an events table.
pub const EVENT_KEYWORDS: &[&str] = &["事件", "回调", "listener", "on"];

/// Header fragments that mark a methods table.
pub const METHOD_KEYWORDS: &[&str] = &["方法", "method", "函数"];

/// Header fragments that mark a properties table.
pub const PROP_KEYWORDS: &[&str] = &[
    "参数", "属性", "属性名", "名称", "配置项", "参数名", "字段", "Prop", "Property", "选项", "可配置项",
];

/// Literal that, combined with one of [`API_PROP_HINTS`], marks a properties table.
pub const API_MARKER: &str = "API";

/// Column fragments that identify an `API` table as a properties table.
pub const API_PROP_HINTS: &[&str] = &["类型", "默认", "必填", "必选", "可选值", "参数"];

/// Canonical fields of a normalized property row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropField {
    Name,
    Description,
    Type,
    Default,
    Version,
    Options,
    Required,
}

impl PropField {
    /// Serialized key of the field.
    pub fn key(self) -> &'static str {
        match self {
            PropField::Name => "name",
            PropField::Description => "description",
            PropField::Type => "type",
            PropField::Default => "default",
            PropField::Version => "version",
            PropField::Options => "options",
            PropField::Required => "required",
        }
    }

    /// Maps a raw column label to its canonical field.
    ///
    /// Labels found in [`HEADER_SYNONYMS`] map through the table; a label that
    /// already spells a canonical key (`"name"`, `"type"`, ...) maps to itself.
    /// Anything else is unmapped and passes through unchanged.
    pub fn from_label(label: &str) -> Option<Self> {
        HEADER_SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == label)
            .map(|(_, field)| *field)
            .or_else(|| ALL_FIELDS.iter().copied().find(|field| field.key() == label))
    }
}

const ALL_FIELDS: &[PropField] = &[
    PropField::Name,
    PropField::Description,
    PropField::Type,
    PropField::Default,
    PropField::Version,
    PropField::Options,
    PropField::Required,
];

/// Column label synonyms, exact match.
pub const HEADER_SYNONYMS: &[(&str, PropField)] = &[
    ("参数", PropField::Name),
    ("属性", PropField::Name),
    ("属性名", PropField::Name),
    ("名称", PropField::Name),
    ("配置项", PropField::Name),
    ("参数名", PropField::Name),
    ("字段", PropField::Name),
    ("Prop", PropField::Name),
    ("Property", PropField::Name),
    ("可配置项", PropField::Name),
    ("说明", PropField::Description),
    ("描述", PropField::Description),
    ("备注", PropField::Description),
    ("含义", PropField::Description),
    ("类型", PropField::Type),
    ("Type", PropField::Type),
    ("数据类型", PropField::Type),
    ("默认值", PropField::Default),
    ("默认", PropField::Default),
    ("缺省值", PropField::Default),
    ("版本", PropField::Version),
    ("Since", PropField::Version),
    ("可选值", PropField::Options),
    ("选项", PropField::Options),
    ("可选", PropField::Options),
    ("枚举", PropField::Options),
    ("是否必填", PropField::Required),
    ("必填", PropField::Required),
    ("必选", PropField::Required),
    ("是否必选", PropField::Required),
];

/// Cell fragments read as "required". Checked before [`REQUIRED_NO`].
pub const REQUIRED_YES: &[&str] = &["是", "必填", "必选", "true", "必须"];

/// Cell fragments read as "optional".
pub const REQUIRED_NO: &[&str] = &["否", "可选", "false", "选填"];

/// True when `haystack` contains any of `needles`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_lookup() {
        assert_eq!(PropField::from_label("参数"), Some(PropField::Name));
        assert_eq!(PropField::from_label("默认值"), Some(PropField::Default));
        assert_eq!(PropField::from_label("Since"), Some(PropField::Version));
        assert_eq!(PropField::from_label("是否必填"), Some(PropField::Required));
    }

    #[test]
    fn test_canonical_keys_map_to_themselves() {
        assert_eq!(PropField::from_label("type"), Some(PropField::Type));
        assert_eq!(PropField::from_label("required"), Some(PropField::Required));
    }

    #[test]
    fn test_unmapped_label() {
        assert_eq!(PropField::from_label("Description"), None);
        assert_eq!(PropField::from_label("全局配置"), None);
    }

    #[test]
    fn test_contains_any_is_substring_match() {
        assert!(contains_any("Description", EVENT_KEYWORDS));
        assert!(!contains_any("参数 说明", EVENT_KEYWORDS));
    }
}
