//! Data-independent service templates.
//!
//! These files never branch on dictionary content; only their namespaces
//! and usings change.
//!
//! ```text
//! IDictionaryService ◄──── DictionaryService ───► ILocalizationService
//!                                  │                (host collaborator)
//!                                  ▼
//!                      DictionaryServiceExtensions
//!                      GetLocaleValue / GetFormattedLocaleValue
//! ```

use super::{SourceWriter, SHARED_NAMESPACE};

const COMPOSING_NAMESPACE: &str = "Umbraco.Core.Composing";
const MODELS_NAMESPACE: &str = "Umbraco.Core.Models";
const SERVICES_NAMESPACE: &str = "Umbraco.Core.Services";
const GLOBALIZATION_NAMESPACE: &str = "System.Globalization";

/// Emits the `IDictionaryService` declaration block.
pub fn emit_service_interface(namespace: &str) -> String {
    let mut w = SourceWriter::new();

    w.line(0, &format!("namespace {namespace}"));
    w.line(0, "{");
    w.summary(
        1,
        "Provides access to Umbraco dictionary items and their localized values.",
    );
    w.line(1, "public interface IDictionaryService");
    w.line(1, "{");
    w.line(2, "IDictionaryItem GetDictionaryItemByKey(DictionaryKey key);");
    w.blank();
    w.line(2, "IDictionaryItem GetDictionaryItemByKey(string key);");
    w.blank();
    w.line(
        2,
        "string GetLocaleValueByKey(DictionaryKey key, CultureInfo culture = null);",
    );
    w.blank();
    w.line(
        2,
        "string GetFormattedLocaleValueByKey(DictionaryKey key, string[] formatArgs, CultureInfo culture = null);",
    );
    w.line(1, "}");
    w.line(0, "}");

    w.finish()
}

/// Complete `IDictionaryService.cs`.
pub fn render_service_interface(namespace: &str) -> String {
    let mut w = SourceWriter::new();
    w.usings([SHARED_NAMESPACE, GLOBALIZATION_NAMESPACE, MODELS_NAMESPACE]);
    w.block(&emit_service_interface(namespace));
    w.finish()
}

/// Emits the `DictionaryService` class block.
///
/// Lookups delegate to `ILocalizationService`; formatting delegates to the
/// generated extension methods.
pub fn emit_service(namespace: &str) -> String {
    let mut w = SourceWriter::new();

    w.line(0, &format!("namespace {namespace}"));
    w.line(0, "{");
    w.summary(
        1,
        "Looks up Umbraco dictionary items and formats their localized values.",
    );
    w.line(1, "public class DictionaryService : IDictionaryService");
    w.line(1, "{");
    w.line(2, "private readonly ILocalizationService _localizationService;");
    w.blank();
    w.line(2, "public DictionaryService()");
    w.line(3, ": this(Current.Factory.GetInstance<ILocalizationService>())");
    w.line(2, "{");
    w.line(2, "}");
    w.blank();
    w.line(2, "public DictionaryService(ILocalizationService localizationService)");
    w.line(2, "{");
    w.line(3, "_localizationService = localizationService;");
    w.line(3, "Culture = UmbracoCulture.Default.CultureInfo;");
    w.line(2, "}");
    w.blank();
    w.line(2, "public DictionaryService(CultureInfo culture)");
    w.line(3, ": this()");
    w.line(2, "{");
    w.line(3, "Culture = culture;");
    w.line(2, "}");
    w.blank();
    w.line(2, "public DictionaryService(string cultureCode)");
    w.line(3, ": this(CultureInfo.GetCultureInfo(cultureCode))");
    w.line(2, "{");
    w.line(2, "}");
    w.blank();
    w.line(2, "public CultureInfo Culture { get; set; }");
    w.blank();
    w.line(2, "public string CultureCode => Culture?.Name;");
    w.blank();
    w.line(2, "public IDictionaryItem GetDictionaryItemByKey(DictionaryKey key)");
    w.line(2, "{");
    w.line(3, "return GetDictionaryItemByKey(key.ToString());");
    w.line(2, "}");
    w.blank();
    w.line(2, "public IDictionaryItem GetDictionaryItemByKey(string key)");
    w.line(2, "{");
    w.line(3, "return _localizationService.GetDictionaryItemByKey(key);");
    w.line(2, "}");
    w.blank();
    w.line(
        2,
        "public string GetLocaleValueByKey(DictionaryKey key, CultureInfo culture = null)",
    );
    w.line(2, "{");
    w.line(
        3,
        "return GetDictionaryItemByKey(key).GetLocaleValue(culture ?? Culture);",
    );
    w.line(2, "}");
    w.blank();
    w.line(
        2,
        "public string GetFormattedLocaleValueByKey(DictionaryKey key, string[] formatArgs, CultureInfo culture = null)",
    );
    w.line(2, "{");
    w.line(
        3,
        "return GetDictionaryItemByKey(key).GetFormattedLocaleValue(formatArgs, culture ?? Culture);",
    );
    w.line(2, "}");
    w.line(1, "}");
    w.line(0, "}");

    w.finish()
}

/// Complete `DictionaryService.cs`.
///
/// Imports the interface and extension namespaces when they differ from
/// the service's own.
pub fn render_service(
    namespace: &str,
    interface_namespace: &str,
    extensions_namespace: &str,
) -> String {
    let mut usings = vec![
        SHARED_NAMESPACE,
        GLOBALIZATION_NAMESPACE,
        COMPOSING_NAMESPACE,
        MODELS_NAMESPACE,
        SERVICES_NAMESPACE,
    ];
    for other in [interface_namespace, extensions_namespace] {
        if other != namespace {
            usings.push(other);
        }
    }

    let mut w = SourceWriter::new();
    w.usings(usings);
    w.block(&emit_service(namespace));
    w.finish()
}

/// Emits the `DictionaryServiceExtensions` class block.
pub fn emit_service_extensions(namespace: &str) -> String {
    let mut w = SourceWriter::new();

    w.line(0, &format!("namespace {namespace}"));
    w.line(0, "{");
    w.summary(1, "Extension methods for reading localized dictionary values.");
    w.line(1, "public static class DictionaryServiceExtensions");
    w.line(1, "{");
    w.line(
        2,
        "public static string GetLocaleValue(this IDictionaryItem dictionaryItem, CultureInfo culture = null)",
    );
    w.line(2, "{");
    w.line(3, "return dictionaryItem.GetFormattedLocaleValue(null, culture);");
    w.line(2, "}");
    w.blank();
    w.line(
        2,
        "public static string GetFormattedLocaleValue(this IDictionaryItem dictionaryItem, string[] formatArgs, CultureInfo culture = null)",
    );
    w.line(2, "{");
    w.line(3, "if (dictionaryItem == null)");
    w.line(3, "{");
    w.line(4, "return null;");
    w.line(3, "}");
    w.blank();
    w.line(3, "culture = culture ?? UmbracoCulture.Default.CultureInfo;");
    w.blank();
    w.line(3, "var translation = dictionaryItem.Translations");
    w.line(4, ".SingleOrDefault(x => x.Language.CultureInfo.Equals(culture));");
    w.blank();
    w.line(3, "if (translation == null)");
    w.line(3, "{");
    w.line(4, "return null;");
    w.line(3, "}");
    w.blank();
    w.line(3, "return formatArgs == null || formatArgs.Length == 0");
    w.line(4, "? translation.Value");
    w.line(4, ": string.Format(translation.Value, formatArgs);");
    w.line(2, "}");
    w.line(1, "}");
    w.line(0, "}");

    w.finish()
}

/// Complete `DictionaryExtensions.cs`.
pub fn render_service_extensions(namespace: &str, service_namespace: &str) -> String {
    let mut usings = vec![
        SHARED_NAMESPACE,
        GLOBALIZATION_NAMESPACE,
        "System.Linq",
        MODELS_NAMESPACE,
    ];
    if service_namespace != namespace {
        usings.push(service_namespace);
    }

    let mut w = SourceWriter::new();
    w.usings(usings);
    w.block(&emit_service_extensions(namespace));
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_lists_all_operations() {
        let source = render_service_interface("Umbraco.Core.Services");
        assert!(source.starts_with(
            "using System;\nusing System.Globalization;\nusing Umbraco.Core.Models;\n\n"
        ));
        assert_eq!(source.matches("GetDictionaryItemByKey(").count(), 2);
        assert!(source.contains("string GetLocaleValueByKey(DictionaryKey key"));
        assert!(source.contains("string GetFormattedLocaleValueByKey(DictionaryKey key"));
    }

    #[test]
    fn test_service_usings_with_default_namespaces() {
        let source = render_service(
            "Umbraco.Core.Services.Implement",
            "Umbraco.Core.Services",
            "Umbraco.Core.Services",
        );
        let usings: Vec<&str> = source.lines().take_while(|l| !l.is_empty()).collect();
        assert_eq!(
            usings,
            vec![
                "using System;",
                "using System.Globalization;",
                "using Umbraco.Core.Composing;",
                "using Umbraco.Core.Models;",
                "using Umbraco.Core.Services;",
            ]
        );
        assert!(source.contains("public class DictionaryService : IDictionaryService"));
        assert!(source.contains("GetFormattedLocaleValue(formatArgs, culture ?? Culture)"));
    }

    #[test]
    fn test_service_imports_custom_extension_namespace() {
        let source = render_service("Acme.Services", "Acme.Services", "Acme.Extensions");
        assert!(source.contains("using Acme.Extensions;\n"));
        assert!(!source.contains("using Acme.Services;\n"));
    }

    #[test]
    fn test_extensions_template() {
        let source = render_service_extensions("Acme.Extensions", "Acme.Services");
        assert!(source.contains("using Acme.Services;\n"));
        assert!(source.contains("using System.Linq;\n"));
        assert!(source.contains("public static class DictionaryServiceExtensions"));
        assert!(source.contains("culture = culture ?? UmbracoCulture.Default.CultureInfo;"));
    }
}
