//! Identifier normalization shared by every dialect.
//!
//! Case conversion goes through `heck`; the two protobind-specific transforms
//! ([`fix_acronyms`] and [`lower_leading_run`]) are small rule tables, not
//! general acronym detectors.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

/// `GetFeature` → `get-feature`.
pub fn to_dash(name: &str) -> String {
    name.to_kebab_case()
}

/// `group_id` → `GroupId`.
pub fn to_camel(name: &str) -> String {
    name.to_upper_camel_case()
}

/// `page_number` → `pageNumber`.
pub fn to_lower_camel(name: &str) -> String {
    name.to_lower_camel_case()
}

/// `getFeature` → `get_feature`.
pub fn to_snake(name: &str) -> String {
    name.to_snake_case()
}

/// Upper-case the few acronyms protobuf field names commonly spell in camel
/// case.
///
/// Rules are checked in order and the first match wins:
///
/// 1. ends in `Id`: names of up to four bytes are upper-cased whole
///    (`Id` → `ID`, `PkId` → `PKID`), longer ones get a trailing `ID`
///    (`GroupId` → `GroupID`).
/// 2. ends in `id` and is at most four bytes: upper-cased whole
///    (`Gid` → `GID`).
/// 3. `Url` → `URL`, `Uri` → `URI`.
///
/// Anything else is returned unchanged.
pub fn fix_acronyms(name: &str) -> String {
    let name = name.trim();
    if let Some(stem) = name.strip_suffix("Id") {
        if name.len() <= 4 {
            return name.to_uppercase();
        }
        return format!("{}ID", stem);
    }
    if name.ends_with("id") && name.len() <= 4 {
        return name.to_uppercase();
    }
    match name {
        "Url" => "URL".to_string(),
        "Uri" => "URI".to_string(),
        _ => name.to_string(),
    }
}

/// Lower-case the leading run of upper-case characters.
///
/// When the run is longer than one character, its last character starts the
/// next word and stays upper-case: `Foo` → `foo`, `FOOBar` → `fooBar`,
/// `GetFeature` → `getFeature`. A name that is upper-case throughout is
/// lower-cased entirely (`ID` → `id`).
pub fn lower_leading_run(name: &str) -> String {
    let mut lower = String::with_capacity(name.len());
    let mut run = 0;
    // Byte offsets of the last upper-case character in `name` and in `lower`.
    let mut last = (0, 0);

    for (pos, ch) in name.char_indices() {
        if ch.is_uppercase() {
            last = (pos, lower.len());
            run += 1;
            lower.extend(ch.to_lowercase());
            continue;
        }
        if run > 1 {
            lower.truncate(last.1);
            lower.push_str(&name[last.0..]);
        } else {
            lower.push_str(&name[pos..]);
        }
        return lower;
    }
    lower
}

/// Drop the package qualifier from a type reference: `.routeguide.Point` →
/// `Point`.
pub fn strip_package(type_ref: &str) -> &str {
    type_ref.rsplit('.').next().unwrap_or(type_ref)
}

/// Drop only the leading dot of a fully-qualified reference:
/// `.routeguide.Point` → `routeguide.Point`.
pub fn strip_leading_dot(type_ref: &str) -> &str {
    type_ref.strip_prefix('.').unwrap_or(type_ref)
}

/// Redux action prefix for a method: `RouteGuide` + `getFeature` →
/// `ROUTEGUIDE_GET_FEATURE`.
pub fn action_name(service: &str, method: &str) -> String {
    format!(
        "{}_{}",
        service.to_uppercase(),
        to_snake(method).to_uppercase()
    )
}

/// Remove repeated entries, keeping the first occurrence of each.
pub fn dedupe<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let set: indexmap::IndexSet<String> = items.into_iter().map(Into::into).collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_leading_run_cases() {
        assert_eq!(lower_leading_run("FooBar"), "fooBar");
        assert_eq!(lower_leading_run("FOOBar"), "fooBar");
        assert_eq!(lower_leading_run("ID"), "id");
        assert_eq!(lower_leading_run("Foo"), "foo");
        assert_eq!(lower_leading_run("GetFeature"), "getFeature");
        assert_eq!(lower_leading_run("ABc"), "aBc");
        assert_eq!(lower_leading_run("alreadyLower"), "alreadyLower");
        assert_eq!(lower_leading_run("A1"), "a1");
        assert_eq!(lower_leading_run(""), "");
    }

    #[test]
    fn lower_leading_run_non_ascii() {
        assert_eq!(lower_leading_run("ÄÖx"), "äÖx");
        assert_eq!(lower_leading_run("Über"), "über");
    }

    #[test]
    fn fix_acronyms_table() {
        assert_eq!(fix_acronyms("GroupId"), "GroupID");
        assert_eq!(fix_acronyms("Id"), "ID");
        assert_eq!(fix_acronyms("PkId"), "PKID");
        assert_eq!(fix_acronyms("Gid"), "GID");
        assert_eq!(fix_acronyms("Pkid"), "PKID");
        assert_eq!(fix_acronyms("Url"), "URL");
        assert_eq!(fix_acronyms("Uri"), "URI");
        assert_eq!(fix_acronyms("Widget"), "Widget");
        assert_eq!(fix_acronyms(" GroupId "), "GroupID");
    }

    #[test]
    fn fix_acronyms_is_a_lookup_not_a_detector() {
        // Long names ending in lowercase "id" are left alone.
        assert_eq!(fix_acronyms("Android"), "Android");
        // Acronyms outside the table pass through.
        assert_eq!(fix_acronyms("Http"), "Http");
        assert_eq!(fix_acronyms("ImageUrl"), "ImageUrl");
    }

    #[test]
    fn case_conversions() {
        insta::assert_snapshot!(to_dash("GetFeature"), @"get-feature");
        insta::assert_snapshot!(to_dash("page_size"), @"page-size");
        insta::assert_snapshot!(to_camel("group_id"), @"GroupId");
        insta::assert_snapshot!(to_lower_camel("page_number"), @"pageNumber");
        insta::assert_snapshot!(to_snake("getFeature"), @"get_feature");
    }

    #[test]
    fn case_conversions_are_idempotent() {
        for name in ["GetFeature", "page_size", "groupId", "HTTPServer", "x"] {
            let dash = to_dash(name);
            assert_eq!(to_dash(&dash), dash);
            let camel = to_camel(name);
            assert_eq!(to_camel(&camel), camel);
            let snake = to_snake(name);
            assert_eq!(to_snake(&snake), snake);
        }
    }

    #[test]
    fn package_stripping() {
        assert_eq!(strip_package(".routeguide.Point"), "Point");
        assert_eq!(strip_package("Point"), "Point");
        assert_eq!(strip_leading_dot(".routeguide.Point"), "routeguide.Point");
        assert_eq!(strip_leading_dot("Point"), "Point");
    }

    #[test]
    fn redux_action_names() {
        assert_eq!(action_name("RouteGuide", "getFeature"), "ROUTEGUIDE_GET_FEATURE");
        assert_eq!(action_name("Auth", "login"), "AUTH_LOGIN");
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        assert_eq!(dedupe(["A", "B", "A", "C"]), vec!["A", "B", "C"]);
        assert!(dedupe(Vec::<String>::new()).is_empty());
    }
}
