//! Stylesheet processing step backed by lightningcss.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

use super::{Processed, ProcessContext, SourceMap, TransformError, TransformStep};

/// Parses and reprints stylesheets through lightningcss.
///
/// Non-CSS content passes through untouched (the match rule also admits
/// HTML, which this step has no business parsing). Produces a source map
/// unless inline maps were requested.
pub struct LightningCss {
    minify: bool,
}

impl LightningCss {
    pub fn new(minify: bool) -> Self {
        Self { minify }
    }
}

impl TransformStep for LightningCss {
    fn name(&self) -> &'static str {
        "lightningcss"
    }

    fn apply(&self, code: &str, ctx: &ProcessContext) -> Result<Processed, TransformError> {
        if !ctx.is_stylesheet() {
            return Ok(Processed {
                code: code.to_string(),
                map: None,
            });
        }

        let stylesheet = StyleSheet::parse(code, ParserOptions::default())
            .map_err(|e| TransformError::new(self.name(), e.to_string()))?;
        let result = stylesheet
            .to_css(PrinterOptions {
                minify: self.minify,
                ..PrinterOptions::default()
            })
            .map_err(|e| TransformError::new(self.name(), e.to_string()))?;

        let map = (!ctx.map_inline).then(|| SourceMap::for_source(ctx.from.as_deref()));
        Ok(Processed {
            code: result.code,
            map,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn css_ctx() -> ProcessContext {
        ProcessContext {
            from: Some("src/app.css".into()),
            ..ProcessContext::default()
        }
    }

    #[test]
    fn test_minifies_stylesheets() {
        let step = LightningCss::new(true);
        let out = step.apply("a { color: red; }", &css_ctx()).unwrap();
        assert_eq!(out.code, "a{color:red}");
        assert!(out.map.is_some());
    }

    #[test]
    fn test_html_passes_through() {
        let step = LightningCss::new(true);
        let ctx = ProcessContext {
            from: Some("src/index.html".into()),
            ..ProcessContext::default()
        };
        let out = step.apply("<body></body>", &ctx).unwrap();
        assert_eq!(out.code, "<body></body>");
        assert!(out.map.is_none());
    }

    #[test]
    fn test_inline_maps_suppress_sidecar_map() {
        let step = LightningCss::new(false);
        let ctx = ProcessContext {
            map_inline: true,
            ..css_ctx()
        };
        let out = step.apply("a { color: red; }", &ctx).unwrap();
        assert!(out.map.is_none());
    }

    #[test]
    fn test_invalid_css_is_an_error() {
        let step = LightningCss::new(false);
        let err = step.apply("}", &css_ctx()).unwrap_err();
        assert_eq!(err.step, "lightningcss");
    }

    #[test]
    fn test_reprint_is_deterministic() {
        let step = LightningCss::new(false);
        let a = step.apply("a { color: red; }", &css_ctx()).unwrap();
        let b = step.apply("a { color: red; }", &css_ctx()).unwrap();
        assert_eq!(a.code, b.code);
    }
}
