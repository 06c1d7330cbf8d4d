//! Culture wrapper struct and the `UmbracoCultures` registry.

use std::collections::HashMap;

use super::{string_literal, SourceWriter, SHARED_NAMESPACE};
use crate::error::{CoreError, CoreResult};
use crate::sanitize::sanitize_culture_name;
use crate::tree::CodegenWarning;
use crate::types::{default_language, LanguageEntry};

/// Emits the `UmbracoCulture` wrapper struct.
///
/// `Default` is baked in from the default language's ISO code, so this is
/// the one artifact that depends on language data.
pub fn emit_culture_struct(namespace: &str, default_iso_code: &str) -> String {
    let mut w = SourceWriter::new();

    w.line(0, &format!("namespace {namespace}"));
    w.line(0, "{");
    w.summary(1, "Typed handle for an Umbraco culture.");
    w.line(1, "public struct UmbracoCulture");
    w.line(1, "{");
    w.line(
        2,
        &format!(
            "public static UmbracoCulture Default => FromString({});",
            string_literal(default_iso_code)
        ),
    );
    w.blank();
    w.line(2, "public readonly string ISO;");
    w.blank();
    w.line(2, "public readonly CultureInfo CultureInfo;");
    w.blank();
    w.line(2, "public UmbracoCulture(string iso)");
    w.line(2, "{");
    w.line(3, "ISO = iso;");
    w.line(3, "try");
    w.line(3, "{");
    w.line(4, "CultureInfo = CultureInfo.GetCultureInfo(iso);");
    w.line(3, "}");
    w.line(3, "catch (CultureNotFoundException)");
    w.line(3, "{");
    w.line(4, "CultureInfo = null;");
    w.line(3, "}");
    w.line(2, "}");
    w.blank();
    w.line(2, "public static UmbracoCulture FromString(string iso)");
    w.line(2, "{");
    w.line(3, "return new UmbracoCulture(iso);");
    w.line(2, "}");
    w.blank();
    w.line(2, "public override string ToString()");
    w.line(2, "{");
    w.line(3, "return ISO;");
    w.line(2, "}");
    w.line(1, "}");
    w.line(0, "}");

    w.finish()
}

/// Emits the culture wrapper (in the shared namespace) followed by
/// `UmbracoCultures` with one field per language, in list order.
///
/// Field names come from [`sanitize_culture_name`]. The first language to
/// claim a name keeps it; later ones are skipped with a warning.
pub fn emit_language_registry(
    namespace: &str,
    languages: &[LanguageEntry],
    default_iso_code: &str,
) -> (String, Vec<CodegenWarning>) {
    let mut warnings = Vec::new();
    let mut owners: HashMap<String, &str> = HashMap::new();

    let mut w = SourceWriter::new();
    w.block(&emit_culture_struct(SHARED_NAMESPACE, default_iso_code));
    w.blank();
    w.line(0, &format!("namespace {namespace}"));
    w.line(0, "{");
    w.summary(1, "Defines the Umbraco cultures.");
    w.line(1, "public partial class UmbracoCultures");
    w.line(1, "{");

    for language in languages {
        let identifier = sanitize_culture_name(&language.iso_code, &language.culture_name);

        if identifier.is_empty() {
            warnings.push(CodegenWarning::EmptyCulture {
                iso_code: language.iso_code.clone(),
            });
            continue;
        }
        if let Some(kept) = owners.get(&identifier) {
            warnings.push(CodegenWarning::DuplicateCulture {
                identifier,
                iso_code: language.iso_code.clone(),
                kept_iso_code: kept.to_string(),
            });
            continue;
        }

        w.line(
            2,
            &format!(
                "public static readonly UmbracoCulture {} = UmbracoCulture.FromString({});",
                identifier,
                string_literal(&language.iso_code)
            ),
        );
        owners.insert(identifier, &language.iso_code);
    }

    w.line(1, "}");
    w.line(0, "}");

    (w.finish(), warnings)
}

/// Complete `UmbracoCulture.cs`.
///
/// ## Returns
/// * `Err(CoreError::MissingDefaultLanguage)` - No language is flagged default
pub fn render_culture_model(
    namespace: &str,
    languages: &[LanguageEntry],
) -> CoreResult<(String, Vec<CodegenWarning>)> {
    let default = default_language(languages).ok_or(CoreError::MissingDefaultLanguage)?;
    let (registry, warnings) = emit_language_registry(namespace, languages, &default.iso_code);

    let mut w = SourceWriter::new();
    w.usings([SHARED_NAMESPACE, "System.Globalization"]);
    w.block(&registry);

    Ok((w.finish(), warnings))
}
