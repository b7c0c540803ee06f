//! Source of the marker protocol and its localisation extension.

use super::GeneratedSource;

/// The marker protocol declaration followed by an extension resolving
/// `localised` against `table_name` in the main bundle.
pub fn protocol_source(marker_interface: &str, table_name: &str) -> Vec<GeneratedSource> {
    let error_pattern = format!(
        "let errorPattern = \"(No translation available for \\(identifier) in {}.strings.)\"",
        table_name
    );
    let lookup = format!(
        "let pattern = Bundle.main.localizedString(forKey: identifier, value: errorPattern, table: \"{}\")",
        table_name
    );
    let log = format!(
        "os_log(.error, \"Missing localised string for key %@ in table {}\", identifier)",
        table_name
    );

    vec![
        GeneratedSource::line("/// A value that can provide a localisable string."),
        GeneratedSource::block(
            format!("protocol {} {{", marker_interface),
            vec![
                GeneratedSource::blank(),
                GeneratedSource::line(
                    "/// The localisable string's identifier, including placeholders for any arguments.",
                ),
                GeneratedSource::line("var identifier: String { get }"),
                GeneratedSource::blank(),
                GeneratedSource::line("/// The arguments for the localised string."),
                GeneratedSource::line("var arguments: [CVarArg] { get }"),
                GeneratedSource::blank(),
                GeneratedSource::line("/// `self` localised in the current locale."),
                GeneratedSource::line("var localised: String { get }"),
                GeneratedSource::blank(),
            ],
            "}",
        ),
        GeneratedSource::blank(),
        GeneratedSource::block(
            format!("extension {} {{", marker_interface),
            vec![
                GeneratedSource::blank(),
                GeneratedSource::block(
                    "var localised: String {",
                    vec![
                        GeneratedSource::line(error_pattern),
                        GeneratedSource::line(lookup),
                        GeneratedSource::block(
                            "guard pattern != errorPattern else {",
                            vec![
                                GeneratedSource::line(log),
                                GeneratedSource::line("return errorPattern"),
                            ],
                            "}",
                        ),
                        GeneratedSource::line("return .init(format: pattern, arguments: arguments)"),
                    ],
                    "}",
                ),
                GeneratedSource::blank(),
            ],
            "}",
        ),
    ]
}
