//! Caret overlay tests driven through the render loop

mod common;

use common::rendered;
use playpen::config::PlaygroundConfig;
use playpen::editable::caret::resolve_line_height;
use playpen::editable::{CaretEvent, LayoutProbe, Rect};
use playpen::syntax::Language;

/// Layout where every character is 8px wide on 20px lines
struct GridProbe {
    caret_offset: Option<usize>,
    collapsed_rect_works: bool,
    line_height: &'static str,
}

impl GridProbe {
    fn rect(&self) -> Option<Rect> {
        self.caret_offset
            .map(|offset| Rect::new(100.0, 50.0 + 8.0 * offset as f32, 0.0, 20.0))
    }
}

impl LayoutProbe for GridProbe {
    fn selection_rect(&self) -> Option<Rect> {
        if self.collapsed_rect_works {
            self.rect()
        } else {
            // Empty line or boundary: zero-height rect
            Some(Rect::new(0.0, 0.0, 0.0, 0.0))
        }
    }

    fn measure_marker(&mut self) -> Option<Rect> {
        self.rect()
    }

    fn surface_rect(&self) -> Rect {
        Rect::new(100.0, 50.0, 640.0, 480.0)
    }

    fn scroll_offset(&self) -> (f32, f32) {
        (0.0, 0.0)
    }

    fn line_height(&self) -> String {
        self.line_height.to_string()
    }

    fn font_size(&self) -> String {
        "15px".to_string()
    }
}

#[test]
fn test_caret_follows_restored_selection() {
    let (mut surface, mut env, mut sync) = rendered("<p>hi</p>", Language::Markup);
    surface.move_caret(&mut env, 5);
    sync.refresh(&mut surface, &mut env);

    let mut overlay = PlaygroundConfig::default().caret_overlay();
    let mut probe = GridProbe {
        caret_offset: Some(5),
        collapsed_rect_works: true,
        line_height: "20px",
    };
    let geometry = overlay.handle(CaretEvent::SelectionChange, &env, &mut probe);
    assert!(geometry.visible);
    assert_eq!(geometry.left, 40.0);
    assert_eq!(geometry.top, 0.0);
    assert_eq!(geometry.height, 20.0);
}

#[test]
fn test_degenerate_rect_uses_marker_and_normal_line_height() {
    let (surface, mut env, _sync) = rendered("", Language::Stylesheet);
    surface.move_caret(&mut env, 0);

    let mut overlay = PlaygroundConfig::default().caret_overlay();
    let mut probe = GridProbe {
        caret_offset: Some(0),
        collapsed_rect_works: false,
        line_height: "normal",
    };
    let geometry = overlay.handle(CaretEvent::Focus, &env, &mut probe);
    assert!(geometry.visible);
    assert_eq!(geometry.left, 0.0);
    assert!((geometry.height - 24.0).abs() < 1e-4);
}

#[test]
fn test_range_selection_and_blur_hide_caret() {
    let (surface, mut env, _sync) = rendered("abc", Language::Markup);
    let mut overlay = PlaygroundConfig::default().caret_overlay();
    let mut probe = GridProbe {
        caret_offset: Some(1),
        collapsed_rect_works: true,
        line_height: "1.5",
    };

    surface.move_caret(&mut env, 1);
    assert!(overlay.handle(CaretEvent::KeyUp, &env, &mut probe).visible);
    assert!((overlay.geometry().height - 22.5).abs() < 1e-4);

    surface.select(&mut env, 0, 2);
    assert!(!overlay.handle(CaretEvent::PointerDown, &env, &mut probe).visible);

    surface.move_caret(&mut env, 1);
    overlay.handle(CaretEvent::SelectionChange, &env, &mut probe);
    let hidden = overlay.handle(CaretEvent::Blur, &env, &mut probe);
    assert!(!hidden.visible);
    assert_eq!(hidden.left, 8.0);
}

#[test]
fn test_line_height_units() {
    assert_eq!(resolve_line_height("24px", "16px", 1.6), 24.0);
    assert_eq!(resolve_line_height("150%", "20px", 1.6), 30.0);
    assert!((resolve_line_height("normal", "", 1.6) - 25.6).abs() < 1e-4);
}
