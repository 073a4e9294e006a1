//! SVG rendering and export

use std::fs;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::FontStyle;

use crate::data::ChartFrame;
use crate::errors::Result;
use crate::layouts::ChartLayout;
use crate::styles::ChartStyle;

pub const TITLE: &str = "X-bar Control Chart";
pub const X_AXIS_TITLE: &str = "Sample Number";
pub const Y_AXIS_TITLE: &str = "X-bar Value";

pub const SERIES_LABEL: &str = "Sample Means (X-bar)";
pub const CENTER_LINE_LABEL: &str = "Center Line (CL)";
pub const UCL_LABEL: &str = "UCL";
pub const LCL_LABEL: &str = "LCL";

const FONT_FAMILY: &str = "sans-serif";
const LEGEND_SWATCH: i32 = 20;

/// Render `frame` to an SVG document
pub fn render_svg(frame: &ChartFrame, style: &ChartStyle, layout: &ChartLayout) -> Result<String> {
    layout.validate()?;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (layout.width, layout.height))
            .into_drawing_area();
        root.fill(&style.colors.background)?;

        let (plot_area, stats_area) = root.split_horizontally(layout.plot_width());
        draw_chart(&plot_area, frame, style, layout)?;
        if layout.stats_panel_width > 0 {
            draw_key_stats(&stats_area, frame, style, layout)?;
        }

        root.present()?;
    }

    tracing::debug!(samples = frame.len(), bytes = svg.len(), "rendered chart");
    Ok(svg)
}

/// Render `frame` and write it to `path`
pub fn export_svg(
    frame: &ChartFrame,
    path: &Path,
    style: &ChartStyle,
    layout: &ChartLayout,
) -> Result<()> {
    let svg = render_svg(frame, style, layout)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, svg)?;
    tracing::info!(path = %path.display(), samples = frame.len(), "exported chart");
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    frame: &ChartFrame,
    style: &ChartStyle,
    layout: &ChartLayout,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let colors = &style.colors;
    let text = colors.text;
    let num_samples = frame.len() as i32;
    let precision = style.stats_format.precision;

    let mut chart = ChartBuilder::on(area)
        .caption(
            TITLE,
            (FONT_FAMILY, style.title_font_size).into_font().color(&text),
        )
        .margin_left(layout.margins.left)
        .margin_right(layout.margins.right)
        .margin_top(layout.margins.top)
        .margin_bottom(layout.margins.bottom)
        .x_label_area_size(layout.x_label_area)
        .y_label_area_size(layout.y_label_area)
        .build_cartesian_2d(layout.x_range(frame), layout.y_range(frame))?;

    let format_x = |x: &i32| {
        if (1..=num_samples).contains(x) {
            xbar::sample_label(*x as usize)
        } else {
            String::new()
        }
    };
    let format_y = |y: &f64| format!("{:.*}", precision, y);
    let label_font = (FONT_FAMILY, style.label_font_size).into_font();

    chart
        .configure_mesh()
        .x_desc(X_AXIS_TITLE)
        .y_desc(Y_AXIS_TITLE)
        .x_labels(layout.x_label_count(frame))
        .x_label_formatter(&format_x)
        .y_label_formatter(&format_y)
        .label_style(label_font.color(&text))
        .axis_desc_style(label_font.color(&text))
        .axis_style(colors.grid.stroke_width(1))
        .bold_line_style(colors.grid.mix(0.4).stroke_width(1))
        .light_line_style(colors.grid.mix(0.15).stroke_width(1))
        .draw()?;

    let series_color = colors.series;
    chart
        .draw_series(LineSeries::new(
            frame.points(),
            series_color.stroke_width(style.series_line_width),
        ))?
        .label(SERIES_LABEL)
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], series_color.stroke_width(2))
        });
    if style.point_radius > 0 {
        chart.draw_series(
            frame
                .points()
                .into_iter()
                .map(|point| Circle::new(point, style.point_radius, series_color.filled())),
        )?;
    }

    let series = frame.series();
    let references = [
        (CENTER_LINE_LABEL, series.center_line, colors.center_line),
        (UCL_LABEL, series.ucl, colors.control_limits),
        (LCL_LABEL, series.lcl, colors.control_limits),
    ];
    let (dash, gap) = style.dash;
    for (label, value, color) in references {
        chart
            .draw_series(DashedLineSeries::new(
                frame.reference_line(value),
                dash,
                gap,
                color.stroke_width(style.reference_line_width),
            ))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(colors.background.mix(0.8).filled())
        .border_style(colors.grid.stroke_width(1))
        .label_font(label_font.color(&text))
        .draw()?;

    Ok(())
}

fn draw_key_stats<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    frame: &ChartFrame,
    style: &ChartStyle,
    layout: &ChartLayout,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let lines = frame.key_stats_lines(&style.stats_format);
    if lines.is_empty() {
        return Ok(());
    }

    let font = (FONT_FAMILY, style.label_font_size).into_font();
    let line_height = style.label_font_size as i32 * 2;
    let x = 10;
    let mut y = layout.margins.top as i32 + style.title_font_size as i32 * 2;

    area.draw(&Text::new(
        "Key Statistics".to_string(),
        (x, y),
        font.clone().style(FontStyle::Bold).color(&style.colors.text),
    ))?;
    for line in lines {
        y += line_height;
        area.draw(&Text::new(line, (x, y), font.color(&style.colors.text)))?;
    }

    Ok(())
}
