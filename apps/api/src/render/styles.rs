//! The resume stylesheet, defined once as a rule table.
//!
//! Embedded previews get the shared rules scoped under `.resume-preview`;
//! standalone documents get them unscoped plus page and print rules. Both are
//! generated from the same tables so the two paths cannot drift apart.

use crate::render::RenderMode;

/// Class of the container wrapping an embedded preview.
pub const PREVIEW_SCOPE: &str = ".resume-preview";

struct Rule {
    selectors: &'static [&'static str],
    declarations: &'static [&'static str],
}

const FONT_STACK: &str = "font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif";

// ────────────────────────────────────────────────────────────────────────────
// Rule tables
// ────────────────────────────────────────────────────────────────────────────

const PAGE_RULES: &[Rule] = &[
    Rule {
        selectors: &["*"],
        declarations: &["margin: 0", "padding: 0", "box-sizing: border-box"],
    },
    Rule {
        selectors: &["body"],
        declarations: &[
            FONT_STACK,
            "line-height: 1.6",
            "color: #333",
            "max-width: 8.5in",
            "margin: 0 auto",
            "padding: 0.5in",
            "background: white",
        ],
    },
];

const PREVIEW_CONTAINER: Rule = Rule {
    selectors: &[PREVIEW_SCOPE],
    declarations: &[
        FONT_STACK,
        "line-height: 1.6",
        "color: #333",
        "max-width: 8.5in",
        "margin: 0 auto",
    ],
};

const SHARED_RULES: &[Rule] = &[
    Rule {
        selectors: &[".header"],
        declarations: &[
            "text-align: center",
            "margin-bottom: 2rem",
            "border-bottom: 2px solid #2c3e50",
            "padding-bottom: 1rem",
        ],
    },
    Rule {
        selectors: &[".header h1"],
        declarations: &[
            "font-size: 2.5rem",
            "font-weight: 700",
            "color: #2c3e50",
            "margin-bottom: 0.5rem",
            "letter-spacing: 1px",
        ],
    },
    Rule {
        selectors: &[".contact-info"],
        declarations: &[
            "display: flex",
            "justify-content: center",
            "flex-wrap: wrap",
            "gap: 1rem",
            "font-size: 0.95rem",
            "color: #555",
        ],
    },
    Rule {
        selectors: &[".contact-info span"],
        declarations: &[
            "padding: 0.2rem 0.8rem",
            "background: #f8f9fa",
            "border-radius: 15px",
            "border: 1px solid #e9ecef",
        ],
    },
    Rule {
        selectors: &[".contact-info a"],
        declarations: &["color: inherit", "text-decoration: none"],
    },
    Rule {
        selectors: &[".section"],
        declarations: &["margin-bottom: 2rem"],
    },
    Rule {
        selectors: &[".section-title"],
        declarations: &[
            "font-size: 1.4rem",
            "font-weight: 700",
            "color: #2c3e50",
            "margin-bottom: 1rem",
            "padding-bottom: 0.3rem",
            "border-bottom: 2px solid #3498db",
            "text-transform: uppercase",
            "letter-spacing: 1px",
        ],
    },
    Rule {
        selectors: &[".summary"],
        declarations: &[
            "font-size: 1rem",
            "line-height: 1.7",
            "color: #555",
            "background: #f8f9fa",
            "padding: 1rem",
            "border-radius: 8px",
            "border-left: 4px solid #3498db",
            "white-space: pre-wrap",
        ],
    },
    Rule {
        selectors: &[".experience-item", ".education-item", ".project-item"],
        declarations: &[
            "margin-bottom: 1.5rem",
            "padding: 1rem",
            "border-radius: 8px",
            "background: #fafafa",
            "border-left: 3px solid #3498db",
        ],
    },
    Rule {
        selectors: &[".experience-header", ".education-header", ".project-header"],
        declarations: &[
            "display: flex",
            "justify-content: space-between",
            "align-items: flex-start",
            "margin-bottom: 0.5rem",
            "flex-wrap: wrap",
        ],
    },
    Rule {
        selectors: &[".position", ".degree", ".project-name"],
        declarations: &["font-size: 1.1rem", "font-weight: 700", "color: #2c3e50"],
    },
    Rule {
        selectors: &[".company", ".institution"],
        declarations: &[
            "font-size: 1rem",
            "font-weight: 600",
            "color: #3498db",
            "margin-bottom: 0.2rem",
        ],
    },
    Rule {
        selectors: &[".date-location"],
        declarations: &["font-size: 0.9rem", "color: #7f8c8d", "text-align: right"],
    },
    Rule {
        selectors: &[".description"],
        declarations: &["margin-top: 0.5rem", "line-height: 1.6", "color: #555"],
    },
    Rule {
        selectors: &[".technologies"],
        declarations: &["margin-top: 0.5rem", "font-weight: 600", "color: #27ae60"],
    },
    Rule {
        selectors: &[".project-links"],
        declarations: &["margin-top: 0.5rem"],
    },
    Rule {
        selectors: &[".project-links a", ".project-links span"],
        declarations: &[
            "color: #3498db",
            "text-decoration: none",
            "margin-right: 1rem",
            "font-weight: 500",
        ],
    },
    Rule {
        selectors: &[".skills-container"],
        declarations: &["display: grid", "grid-template-columns: 1fr 1fr", "gap: 2rem"],
    },
    Rule {
        selectors: &[".skills-category"],
        declarations: &[
            "background: #f8f9fa",
            "padding: 1rem",
            "border-radius: 8px",
            "border-left: 3px solid #e74c3c",
        ],
    },
    Rule {
        selectors: &[".skills-category h4"],
        declarations: &[
            "font-size: 1.1rem",
            "font-weight: 700",
            "color: #2c3e50",
            "margin-bottom: 0.5rem",
        ],
    },
    Rule {
        selectors: &[".skills-list"],
        declarations: &["display: flex", "flex-wrap: wrap", "gap: 0.5rem"],
    },
    Rule {
        selectors: &[".skill-tag"],
        declarations: &[
            "background: #3498db",
            "color: white",
            "padding: 0.3rem 0.8rem",
            "border-radius: 15px",
            "font-size: 0.85rem",
            "font-weight: 500",
        ],
    },
];

const NARROW_SCREEN_RULES: &[Rule] = &[
    Rule {
        selectors: &[".experience-header", ".education-header", ".project-header"],
        declarations: &["flex-direction: column"],
    },
    Rule {
        selectors: &[".date-location"],
        declarations: &["text-align: left", "margin-top: 0.2rem"],
    },
    Rule {
        selectors: &[".skills-container"],
        declarations: &["grid-template-columns: 1fr"],
    },
];

/// Print overrides: force backgrounds to print and keep sections and entries on one page.
const PRINT_RULES: &[Rule] = &[
    Rule {
        selectors: &["*"],
        declarations: &[
            "-webkit-print-color-adjust: exact !important",
            "print-color-adjust: exact !important",
            "color-adjust: exact !important",
        ],
    },
    Rule {
        selectors: &["body"],
        declarations: &[
            "padding: 0.5in",
            "font-size: 11pt",
            "background: white !important",
            "margin: 0",
        ],
    },
    Rule {
        selectors: &["a"],
        declarations: &["pointer-events: none", "text-decoration: none !important"],
    },
    Rule {
        selectors: &[".header"],
        declarations: &["page-break-after: avoid", "break-after: avoid"],
    },
    Rule {
        selectors: &[".header h1"],
        declarations: &["font-size: 22pt", "margin-bottom: 8pt"],
    },
    Rule {
        selectors: &[".contact-info"],
        declarations: &["font-size: 9pt", "gap: 0.5rem"],
    },
    Rule {
        selectors: &[".contact-info span"],
        declarations: &[
            "padding: 2pt 6pt",
            "background: #f8f9fa !important",
            "border: 1pt solid #e9ecef !important",
        ],
    },
    Rule {
        selectors: &[".section"],
        declarations: &["page-break-inside: avoid", "break-inside: avoid", "margin-bottom: 16pt"],
    },
    Rule {
        selectors: &[".section-title"],
        declarations: &[
            "font-size: 13pt",
            "margin-bottom: 8pt",
            "padding-bottom: 3pt",
            "border-bottom: 2pt solid #3498db !important",
            "page-break-after: avoid",
            "break-after: avoid",
        ],
    },
    Rule {
        selectors: &[".summary"],
        declarations: &[
            "background: #f8f9fa !important",
            "border-left: 4pt solid #3498db !important",
            "padding: 8pt",
            "page-break-inside: avoid",
            "break-inside: avoid",
        ],
    },
    Rule {
        selectors: &[".experience-item", ".education-item", ".project-item"],
        declarations: &[
            "background: #fafafa !important",
            "border-left: 3pt solid #3498db !important",
            "padding: 8pt",
            "margin-bottom: 12pt",
            "page-break-inside: avoid",
            "break-inside: avoid",
        ],
    },
    Rule {
        selectors: &[".skills-category"],
        declarations: &[
            "background: #f8f9fa !important",
            "border-left: 3pt solid #e74c3c !important",
            "page-break-inside: avoid",
            "break-inside: avoid",
        ],
    },
    Rule {
        selectors: &[".skill-tag"],
        declarations: &[
            "background: #3498db !important",
            "color: white !important",
            "padding: 2pt 6pt",
            "font-size: 8pt",
        ],
    },
    Rule {
        selectors: &[".project-links a", ".company", ".institution"],
        declarations: &["color: #3498db !important"],
    },
    Rule {
        selectors: &[".technologies"],
        declarations: &["color: #27ae60 !important"],
    },
];

// ────────────────────────────────────────────────────────────────────────────
// Stylesheet assembly
// ────────────────────────────────────────────────────────────────────────────

/// Builds the stylesheet body (without the `<style>` element) for `mode`.
pub fn stylesheet(mode: RenderMode) -> String {
    let mut css = String::new();
    match mode {
        RenderMode::Embedded => {
            write_rules(&mut css, std::slice::from_ref(&PREVIEW_CONTAINER), None, "");
            write_rules(&mut css, SHARED_RULES, Some(PREVIEW_SCOPE), "");
            write_media(&mut css, "(max-width: 768px)", NARROW_SCREEN_RULES, Some(PREVIEW_SCOPE));
        }
        RenderMode::Standalone => {
            write_rules(&mut css, PAGE_RULES, None, "");
            write_rules(&mut css, SHARED_RULES, None, "");
            write_media(&mut css, "print", PRINT_RULES, None);
            write_media(&mut css, "(max-width: 768px)", NARROW_SCREEN_RULES, None);
        }
    }
    css
}

fn write_media(css: &mut String, query: &str, rules: &[Rule], scope: Option<&str>) {
    css.push_str(&format!("@media {} {{\n", query));
    write_rules(css, rules, scope, "  ");
    css.push_str("}\n");
}

fn write_rules(css: &mut String, rules: &[Rule], scope: Option<&str>, indent: &str) {
    for rule in rules {
        let selectors: Vec<String> = rule
            .selectors
            .iter()
            .map(|s| match scope {
                Some(scope) => format!("{} {}", scope, s),
                None => s.to_string(),
            })
            .collect();

        css.push_str(&format!("{}{} {{\n", indent, selectors.join(", ")));
        for declaration in rule.declarations {
            css.push_str(&format!("{}  {};\n", indent, declaration));
        }
        css.push_str(&format!("{}}}\n", indent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_has_print_block_and_page_rules() {
        let css = stylesheet(RenderMode::Standalone);
        assert!(css.contains("@media print {"));
        assert!(css.contains("page-break-inside: avoid;"));
        assert!(css.contains("-webkit-print-color-adjust: exact !important;"));
        assert!(css.contains("body {\n"));
    }

    #[test]
    fn test_embedded_has_no_print_or_page_rules() {
        let css = stylesheet(RenderMode::Embedded);
        assert!(!css.contains("@media print"));
        assert!(!css.contains("\nbody {"));
        assert!(!css.starts_with("* {"));
    }

    #[test]
    fn test_embedded_rules_are_scoped() {
        let css = stylesheet(RenderMode::Embedded);
        assert!(css.contains(".resume-preview .header {"));
        assert!(css.contains(
            ".resume-preview .experience-item, .resume-preview .education-item, .resume-preview .project-item {"
        ));
        assert!(css.contains(
            "  .resume-preview .skills-container {\n    grid-template-columns: 1fr;"
        ));
    }

    #[test]
    fn test_shared_declarations_identical_in_both_modes() {
        let embedded = stylesheet(RenderMode::Embedded);
        let standalone = stylesheet(RenderMode::Standalone);
        for rule in SHARED_RULES {
            for declaration in rule.declarations {
                let line = format!("  {};\n", declaration);
                assert!(embedded.contains(&line), "embedded missing {declaration}");
                assert!(standalone.contains(&line), "standalone missing {declaration}");
            }
        }
    }
}
