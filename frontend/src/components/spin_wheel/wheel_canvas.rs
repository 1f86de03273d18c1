use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use shared::shared_wheel_game::Segment;
use shared::wheel_math::{segment_at, segment_width};

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub segments: Vec<Segment>,
    pub rotation: f64,
    pub is_spinning: bool,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let segments = props.segments.clone();
        let rotation = props.rotation;
        let is_spinning = props.is_spinning;

        use_effect_with(
            (rotation, segments, is_spinning),
            move |(rotation, segments, is_spinning)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    draw_wheel(&canvas, segments, *rotation, *is_spinning);
                }
                || ()
            },
        );
    }

    html! {
        <div class="relative">
            <canvas
                ref={canvas_ref}
                width="450"
                height="450"
                class="w-full max-w-[450px] h-auto rounded-full transition-all duration-300"
                style={if props.is_spinning {
                    "filter: drop-shadow(0px 5px 20px rgba(130, 100, 255, 0.4));"
                } else {
                    "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.2));"
                }}
            />
        </div>
    }
}

fn draw_wheel(canvas: &HtmlCanvasElement, segments: &[Segment], rotation: f64, is_spinning: bool) {
    if segments.is_empty() {
        return;
    }
    let Some(context) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 2.0 - 20.0;

    context.clear_rect(0.0, 0.0, width, height);

    // Check if dark mode is active
    let is_dark_mode = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false);

    // Soft outer glow, a little stronger while the wheel is live
    let glow_alpha = if is_spinning { 0.25 } else { 0.15 };
    context.begin_path();
    if is_dark_mode {
        context.set_fill_style_str(&format!("rgba(130, 100, 255, {})", glow_alpha));
    } else {
        context.set_fill_style_str(&format!("rgba(100, 130, 255, {})", glow_alpha));
    }
    let _ = context.arc(center_x, center_y, radius + 15.0, 0.0, 2.0 * PI);
    context.fill();

    // Wheel background
    context.begin_path();
    context.set_fill_style_str(if is_dark_mode { "#1a1c2e" } else { "#f0f2ff" });
    let _ = context.arc(center_x, center_y, radius, 0.0, 2.0 * PI);
    context.fill();

    let seg_width = segment_width(segments.len());

    context.save();
    let _ = context.translate(center_x, center_y);
    let _ = context.rotate(rotation * PI / 180.0);
    let _ = context.translate(-center_x, -center_y);

    // Segment arcs. The layout is shifted half a segment so the slice that
    // segment_at reports sits centered under the pointer.
    for (index, segment) in segments.iter().enumerate() {
        let start_deg = index as f64 * seg_width - 90.0 + seg_width / 2.0;
        let end_deg = start_deg + seg_width;
        context.begin_path();
        context.set_fill_style_str(&segment.fill_color);
        context.move_to(center_x, center_y);
        let _ = context.arc(
            center_x,
            center_y,
            radius,
            start_deg.to_radians(),
            end_deg.to_radians(),
        );
        context.close_path();
        context.fill();
        context.set_stroke_style_str("#374151");
        context.set_line_width(2.0);
        context.stroke();
    }

    // Labels ride the rotating context; the left half is flipped so text
    // reads upright at rest.
    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_font("bold 14px Arial, sans-serif");
    context.set_shadow_color("rgba(0, 0, 0, 0.8)");
    context.set_shadow_blur(2.0);
    for (index, segment) in segments.iter().enumerate() {
        let mid_deg = index as f64 * seg_width - 90.0 + seg_width;
        let flipped = {
            let m = mid_deg.rem_euclid(360.0);
            m > 90.0 && m < 270.0
        };
        context.save();
        let _ = context.translate(center_x, center_y);
        let _ = context.rotate(mid_deg.to_radians());
        let _ = context.translate(radius * 0.72, 0.0);
        if flipped {
            let _ = context.rotate(PI);
        }
        context.set_fill_style_str(&segment.text_color);
        let _ = context.fill_text(&segment.label, 0.0, 0.0);
        context.restore();
    }
    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);

    context.restore();

    // Outer ring, pulsing while spinning
    context.begin_path();
    if is_spinning {
        let pulse = (js_sys::Date::now() / 400.0).sin() * 0.2 + 0.5;
        context.set_stroke_style_str(&format!("rgba(180, 130, 255, {})", pulse));
        context.set_line_width(5.0);
    } else {
        context.set_stroke_style_str("rgba(130, 100, 255, 0.5)");
        context.set_line_width(4.0);
    }
    let _ = context.arc(center_x, center_y, radius - 2.0, 0.0, 2.0 * PI);
    context.stroke();

    // Center hub mirrors the segment currently under the pointer
    let pointed = &segments[segment_at(rotation, segments.len())];
    let hub_radius = radius * 0.25;
    context.begin_path();
    context.set_fill_style_str(&pointed.fill_color);
    let _ = context.arc(center_x, center_y, hub_radius, 0.0, 2.0 * PI);
    context.fill();
    context.begin_path();
    context.set_fill_style_str("#1f2937");
    let _ = context.arc(center_x, center_y, hub_radius - 6.0, 0.0, 2.0 * PI);
    context.fill();

    let hub_label: String = if pointed.label.chars().count() > 10 {
        let head: String = pointed.label.chars().take(9).collect();
        format!("{}…", head)
    } else {
        pointed.label.clone()
    };
    context.set_font("bold 12px Arial, sans-serif");
    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_fill_style_str(&pointed.text_color);
    let _ = context.fill_text(&hub_label, center_x, center_y);

    // Pointer fixed at 12 o'clock
    context.set_shadow_color(if is_spinning {
        "rgba(255, 215, 130, 0.8)"
    } else {
        "rgba(255, 215, 0, 0.6)"
    });
    context.set_shadow_blur(if is_spinning { 10.0 } else { 4.0 });
    context.begin_path();
    let pointer_width = 18.0;
    let pointer_height = 28.0;
    let base_y = center_y - radius - 6.0;
    context.move_to(center_x, base_y + pointer_height);
    context.line_to(center_x - pointer_width, base_y);
    context.line_to(center_x + pointer_width, base_y);
    context.close_path();
    context.set_fill_style_str(if is_spinning { "#ffd700" } else { "#f59e0b" });
    context.fill();
    context.set_stroke_style_str("#e69500");
    context.set_line_width(1.5);
    context.stroke();
    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);
}
