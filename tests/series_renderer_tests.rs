use std::sync::Arc;

use graph_view::api::{
    BarRenderer, CandlestickRenderer, ChartStyle, DotRenderer, LabelFormatter, LineRenderer,
    SeriesAppearance, SeriesRenderContext, SeriesRenderer,
};
use graph_view::core::{AxisRange, CandlePoint, CoordinateMapper, DataPoint, PlotArea};
use graph_view::render::{Color, DrawCommand, RecordingSurface, TextHAlign};

const BULLISH: Color = Color::rgb(0.0, 0.8, 0.0);
const BEARISH: Color = Color::rgb(0.8, 0.0, 0.0);

fn mapper() -> CoordinateMapper {
    CoordinateMapper::new(
        AxisRange::new(0.0, 2.0),
        AxisRange::new(0.0, 10.0),
        PlotArea::new(0.0, 0.0, 100.0, 100.0),
    )
    .expect("mapper")
}

fn kinds(surface: &RecordingSurface) -> Vec<&'static str> {
    surface
        .frame()
        .commands
        .iter()
        .map(|command| match command {
            DrawCommand::Line(_) => "line",
            DrawCommand::Rect(_) => "rect",
            DrawCommand::Circle(_) => "circle",
            DrawCommand::Path(_) => "path",
            DrawCommand::Text(_) => "text",
        })
        .collect()
}

#[test]
fn line_fill_is_drawn_beneath_segments() {
    let formatter = LabelFormatter::default();
    let context = SeriesRenderContext {
        mapper: mapper(),
        formatter: &formatter,
        text_size_px: 12.0,
    };
    let appearance = SeriesAppearance::default().with_background(Color::rgba(0.0, 0.0, 1.0, 0.5));
    let points = [DataPoint::new(0.0, 5.0), DataPoint::new(1.0, 10.0), DataPoint::new(2.0, 0.0)];

    let mut surface = RecordingSurface::new(100.0, 100.0);
    LineRenderer
        .render(&mut surface, &points, &appearance, &context)
        .expect("render");

    assert_eq!(kinds(&surface), vec!["path", "line", "line"]);
    let path = surface.frame().paths().next().expect("fill path");
    assert_eq!(path.points.first(), Some(&(0.0, 50.0)));
    assert_eq!(path.points.last(), Some(&(0.0, 100.0)));
}

#[test]
fn single_point_line_draws_only_its_marker() {
    let formatter = LabelFormatter::default();
    let context = SeriesRenderContext {
        mapper: mapper(),
        formatter: &formatter,
        text_size_px: 12.0,
    };
    let appearance = SeriesAppearance::default().with_data_points(4.0);

    let mut surface = RecordingSurface::new(100.0, 100.0);
    LineRenderer
        .render(&mut surface, &[DataPoint::new(1.0, 5.0)], &appearance, &context)
        .expect("render");
    assert_eq!(kinds(&surface), vec!["circle"]);
}

#[test]
fn bars_draw_values_on_top_and_move_clipped_text_inside() {
    let formatter = LabelFormatter::default();
    let context = SeriesRenderContext {
        mapper: mapper(),
        formatter: &formatter,
        text_size_px: 12.0,
    };
    let points = [DataPoint::new(0.0, 5.0), DataPoint::new(1.0, 10.0)];

    let mut surface = RecordingSurface::new(100.0, 100.0);
    BarRenderer {
        values_on_top: Some(Color::BLACK),
    }
    .render(&mut surface, &points, &SeriesAppearance::default(), &context)
    .expect("render");

    assert_eq!(kinds(&surface), vec!["rect", "text", "rect", "text"]);
    let rects: Vec<(f64, f64, f64, f64)> = surface
        .frame()
        .rects()
        .map(|rect| (rect.x, rect.y, rect.width, rect.height))
        .collect();
    assert_eq!(rects, vec![(0.0, 50.0, 49.0, 50.0), (50.0, 0.0, 49.0, 100.0)]);

    let texts: Vec<(&str, f64, f64)> = surface
        .frame()
        .texts()
        .map(|text| (text.text.as_str(), text.x, text.y))
        .collect();
    assert_eq!(texts, vec![("5", 24.5, 46.0), ("10", 74.5, 12.0)]);
    assert!(
        surface
            .frame()
            .texts()
            .all(|text| text.h_align == TextHAlign::Center)
    );
}

#[test]
fn value_dependent_color_overrides_series_color() {
    let formatter = LabelFormatter::default();
    let context = SeriesRenderContext {
        mapper: mapper(),
        formatter: &formatter,
        text_size_px: 12.0,
    };
    let high = Color::rgb(1.0, 0.0, 0.0);
    let appearance = SeriesAppearance::default()
        .with_value_dependent_color(Arc::new(move |_x, y| {
            if y > 6.0 { high } else { Color::BLACK }
        }));

    let mut surface = RecordingSurface::new(100.0, 100.0);
    ChartStyle::bar()
        .render(
            &mut surface,
            &[DataPoint::new(0.0, 5.0), DataPoint::new(1.0, 8.0)],
            &appearance,
            &context,
        )
        .expect("render");
    let colors: Vec<Color> = surface.frame().rects().map(|rect| rect.fill_color).collect();
    assert_eq!(colors, vec![Color::BLACK, high]);
}

#[test]
fn dots_draw_one_circle_per_point() {
    let formatter = LabelFormatter::default();
    let context = SeriesRenderContext {
        mapper: mapper(),
        formatter: &formatter,
        text_size_px: 12.0,
    };
    let appearance = SeriesAppearance::default().with_data_points(3.0);
    let points = [DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 5.0), DataPoint::new(2.0, 10.0)];

    let mut surface = RecordingSurface::new(100.0, 100.0);
    DotRenderer
        .render(&mut surface, &points, &appearance, &context)
        .expect("render");

    let circles: Vec<(f64, f64, f64)> = surface
        .frame()
        .circles()
        .map(|circle| (circle.center_x, circle.center_y, circle.radius))
        .collect();
    assert_eq!(
        circles,
        vec![(0.0, 100.0, 3.0), (50.0, 50.0, 3.0), (100.0, 0.0, 3.0)]
    );
}

#[test]
fn candles_draw_wick_then_body_in_direction_color() {
    let formatter = LabelFormatter::default();
    let context = SeriesRenderContext {
        mapper: mapper(),
        formatter: &formatter,
        text_size_px: 12.0,
    };
    let points = [
        CandlePoint::new(1.0, 2.0, 8.0, 1.0, 6.0).expect("bullish"),
        CandlePoint::new(1.5, 6.0, 7.0, 3.0, 4.0).expect("bearish"),
    ];

    let mut surface = RecordingSurface::new(100.0, 100.0);
    CandlestickRenderer {
        bullish_color: BULLISH,
        bearish_color: BEARISH,
    }
    .render(&mut surface, &points, &SeriesAppearance::default(), &context)
    .expect("render");

    assert_eq!(kinds(&surface), vec!["line", "rect", "line", "rect"]);
    let wick = surface.frame().lines().next().expect("wick");
    assert_eq!((wick.x1, wick.y1, wick.y2), (50.0, 20.0, 90.0));
    assert_eq!(wick.color, BULLISH);

    let bodies: Vec<_> = surface.frame().rects().copied().collect();
    assert_eq!((bodies[0].x, bodies[0].y, bodies[0].width, bodies[0].height), (46.0, 40.0, 8.0, 40.0));
    assert_eq!(bodies[0].fill_color, BULLISH);
    assert_eq!(bodies[1].fill_color, BEARISH);
}

#[test]
fn flat_candle_keeps_visible_body() {
    let formatter = LabelFormatter::default();
    let context = SeriesRenderContext {
        mapper: mapper(),
        formatter: &formatter,
        text_size_px: 12.0,
    };
    let points = [CandlePoint::new(1.0, 5.0, 6.0, 4.0, 5.0).expect("doji")];

    let mut surface = RecordingSurface::new(100.0, 100.0);
    ChartStyle::candlestick()
        .render(&mut surface, &points, &SeriesAppearance::default(), &context)
        .expect("render");

    let body = surface.frame().rects().next().expect("body");
    assert_eq!(body.height, 1.0);
}
