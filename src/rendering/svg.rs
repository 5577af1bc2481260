use crate::{
    core::{config::LegendConfig, geo::Point},
    layers::{popup::PopupContent, style::MarkerStyle},
    legend::view::LegendView,
    rendering::surface::DrawSurface,
};
use std::fmt::Write;

const FONT: &str = "Helvetica, Arial, sans-serif";
const POPUP_FONT_SIZE: f64 = 12.0;
const POPUP_LINE_HEIGHT: f64 = 16.0;
const POPUP_PADDING: f64 = 8.0;
/// Height of the tip below the popup box
const POPUP_TIP: f64 = 8.0;

/// Headless surface producing an SVG document
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Point,
    background: String,
    body: String,
}

impl SvgSurface {
    pub fn new(size: Point) -> Self {
        Self {
            size,
            background: "#dddddd".to_string(),
            body: String::new(),
        }
    }

    /// Places the legend with its top left corner at `origin`
    pub fn legend(&mut self, view: &LegendView, config: &LegendConfig, origin: Point) {
        let _ = writeln!(
            self.body,
            "  <g class='legend' transform='translate({:.1} {:.1})'>",
            origin.x, origin.y
        );
        let _ = writeln!(
            self.body,
            "    <rect width='{}' height='{}' fill='#ffffff' fill-opacity='0.8'/>",
            config.width,
            config.height + 24.0
        );
        let _ = writeln!(
            self.body,
            "    <text x='8' y='16' font-family='{FONT}' font-size='12' font-weight='700'>{}</text>",
            escape_text(&view.title)
        );
        let _ = writeln!(self.body, "    <g transform='translate(0 24)'>");
        write_legend_entries(&mut self.body, view, config, "      ");
        let _ = writeln!(self.body, "    </g>");
        let _ = writeln!(self.body, "  </g>");
    }

    pub fn finish(self) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{:.0}' height='{:.0}' viewBox='0 0 {:.0} {:.0}'>",
            self.size.x, self.size.y, self.size.x, self.size.y
        );
        let _ = writeln!(
            svg,
            "  <rect width='{:.0}' height='{:.0}' fill='{}'/>",
            self.size.x, self.size.y, self.background
        );
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl DrawSurface for SvgSurface {
    fn size(&self) -> Point {
        self.size
    }

    fn circle(&mut self, center: Point, radius: f64, style: &MarkerStyle) {
        let _ = writeln!(
            self.body,
            "  <circle cx='{:.2}' cy='{:.2}' r='{:.2}' {}/>",
            center.x,
            center.y,
            radius,
            style_attributes(style)
        );
    }

    fn popup(&mut self, anchor: Point, content: &PopupContent) {
        let longest = content
            .lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        // rough glyph width, enough to keep text inside the box
        let width = longest as f64 * POPUP_FONT_SIZE * 0.55 + 2.0 * POPUP_PADDING;
        let height = content.lines.len() as f64 * POPUP_LINE_HEIGHT + 2.0 * POPUP_PADDING;
        let left = anchor.x - width / 2.0;
        let top = anchor.y - POPUP_TIP - height;

        let _ = writeln!(self.body, "  <g class='popup'>");
        let _ = writeln!(
            self.body,
            "    <rect x='{left:.2}' y='{top:.2}' width='{width:.2}' height='{height:.2}' rx='6' fill='#ffffff' stroke='#999999'/>"
        );
        let _ = writeln!(
            self.body,
            "    <path d='M {:.2} {:.2} L {:.2} {:.2} L {:.2} {:.2} Z' fill='#ffffff'/>",
            anchor.x - POPUP_TIP,
            anchor.y - POPUP_TIP,
            anchor.x + POPUP_TIP,
            anchor.y - POPUP_TIP,
            anchor.x,
            anchor.y
        );
        for (i, line) in content.lines.iter().enumerate() {
            let _ = writeln!(
                self.body,
                "    <text x='{:.2}' y='{:.2}' font-family='{FONT}' font-size='{POPUP_FONT_SIZE}'>{}</text>",
                left + POPUP_PADDING,
                top + POPUP_PADDING + (i as f64 + 0.8) * POPUP_LINE_HEIGHT,
                escape_text(line)
            );
        }
        let _ = writeln!(self.body, "  </g>");
    }

    fn message(&mut self, text: &str) {
        let _ = writeln!(
            self.body,
            "  <text x='{:.1}' y='{:.1}' text-anchor='middle' font-family='{FONT}' font-size='16'>{}</text>",
            self.size.x / 2.0,
            self.size.y / 2.0,
            escape_text(text)
        );
    }
}

/// Standalone legend document: max, mean and min circles sharing a baseline
pub fn render_legend_svg(view: &LegendView, config: &LegendConfig) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' id='attribute-legend' width='{}px' height='{}px'>",
        config.width, config.height
    );
    let _ = writeln!(svg, "  <title>{}</title>", escape_text(&view.title));
    write_legend_entries(&mut svg, view, config, "  ");
    svg.push_str("</svg>\n");
    svg
}

fn write_legend_entries(out: &mut String, view: &LegendView, config: &LegendConfig, indent: &str) {
    for entry in &view.entries {
        let _ = writeln!(
            out,
            "{indent}<circle class='legend-circle' id='{}' cx='{}' cy='{}' r='{}' {}/>",
            entry.kind.as_str(),
            entry.cx,
            entry.cy,
            entry.radius,
            style_attributes(&config.style)
        );
    }
    for entry in &view.entries {
        let _ = writeln!(
            out,
            "{indent}<text id='{}-text' x='{}' y='{}' font-family='{FONT}' font-size='12'>{}</text>",
            entry.kind.as_str(),
            entry.text_x,
            entry.text_y,
            escape_text(&entry.label)
        );
    }
}

fn style_attributes(style: &MarkerStyle) -> String {
    format!(
        "fill='{}' fill-opacity='{}' stroke='{}' stroke-opacity='{}' stroke-width='{}'",
        style.fill_color.to_hex(),
        style.fill_opacity,
        style.stroke_color.to_hex(),
        style.opacity,
        style.stroke_width
    )
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::attributes::AttributeKey, legend::summary::Summary, symbology::radius::RadiusScale,
    };

    fn legend() -> LegendView {
        LegendView::build(
            &AttributeKey::new("Deposits_2010"),
            Summary::from_values([10.0, 20.0, 90.0]),
            &RadiusScale::new(5.0),
            &LegendConfig::default(),
            "thousand",
        )
    }

    #[test]
    fn test_legend_svg() {
        let svg = render_legend_svg(&legend(), &LegendConfig::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width='220px' height='100px'"));
        assert!(svg.contains("<title>Deposits in 2010</title>"));
        assert!(svg.contains("id='max'"));
        assert!(svg.contains("id='mean'"));
        assert!(svg.contains("id='min'"));
        assert!(svg.contains("id='mean-text' x='92' y='49'"));
        assert!(svg.contains(">50 thousand</text>"));
        assert!(svg.contains("fill-opacity='0.8'"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_empty_legend_has_no_circles() {
        let view = LegendView::build(
            &AttributeKey::new("Deposits_2010"),
            None,
            &RadiusScale::new(5.0),
            &LegendConfig::default(),
            "thousand",
        );
        let svg = render_legend_svg(&view, &LegendConfig::default());
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_surface_draws_and_escapes() {
        let mut surface = SvgSurface::new(Point::new(400.0, 300.0));
        surface.circle(Point::new(10.0, 20.0), 5.0, &MarkerStyle::default());
        surface.popup(
            Point::new(100.0, 100.0),
            &PopupContent::new(vec!["City: A&B".to_string()]),
        );
        surface.message("Loading");
        let svg = surface.finish();

        assert!(svg.contains("<circle cx='10.00' cy='20.00' r='5.00' fill='#117ACA'"));
        assert!(svg.contains("City: A&amp;B"));
        assert!(svg.contains(">Loading</text>"));
    }
}
