//! Writes laid-out pages as a PDF document with `lopdf`.

use super::layout::{DrawOp, Page, Rgb, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use super::metrics::{encode_win_ansi, Font};
use crate::utils::error::{AppError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

const PT_PER_MM: f32 = 72.0 / 25.4;
// 圓弧的貝茲控制點係數
const KAPPA: f32 = 0.552_284_8;

fn pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

fn real(v: f32) -> Object {
    Object::Real(v)
}

fn x_pt(mm: f32) -> Object {
    real(pt(mm))
}

fn y_pt(mm: f32) -> Object {
    real(pt(PAGE_HEIGHT_MM - mm))
}

fn color_operands(color: Rgb) -> Vec<Object> {
    vec![
        real(color.0 as f32 / 255.0),
        real(color.1 as f32 / 255.0),
        real(color.2 as f32 / 255.0),
    ]
}

fn font_name(font: Font) -> Object {
    match font {
        Font::Regular => Object::Name(b"F1".to_vec()),
        Font::Bold => Object::Name(b"F2".to_vec()),
    }
}

fn move_to(x: f32, y: f32) -> Operation {
    Operation::new("m", vec![x_pt(x), y_pt(y)])
}

fn line_to(x: f32, y: f32) -> Operation {
    Operation::new("l", vec![x_pt(x), y_pt(y)])
}

fn curve_to(c1: (f32, f32), c2: (f32, f32), end: (f32, f32)) -> Operation {
    Operation::new(
        "c",
        vec![
            x_pt(c1.0),
            y_pt(c1.1),
            x_pt(c2.0),
            y_pt(c2.1),
            x_pt(end.0),
            y_pt(end.1),
        ],
    )
}

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<Operation> {
    let r = r.min(w / 2.0).min(h / 2.0);
    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);
    vec![
        move_to(x + r, y),
        line_to(right - r, y),
        curve_to((right - r + k, y), (right, y + r - k), (right, y + r)),
        line_to(right, bottom - r),
        curve_to((right, bottom - r + k), (right - r + k, bottom), (right - r, bottom)),
        line_to(x + r, bottom),
        curve_to((x + r - k, bottom), (x, bottom - r + k), (x, bottom - r)),
        line_to(x, y + r),
        curve_to((x, y + r - k), (x + r - k, y), (x + r, y)),
        Operation::new("h", vec![]),
    ]
}

fn circle_path(cx: f32, cy: f32, r: f32) -> Vec<Operation> {
    let k = r * KAPPA;
    vec![
        move_to(cx + r, cy),
        curve_to((cx + r, cy + k), (cx + k, cy + r), (cx, cy + r)),
        curve_to((cx - k, cy + r), (cx - r, cy + k), (cx - r, cy)),
        curve_to((cx - r, cy - k), (cx - k, cy - r), (cx, cy - r)),
        curve_to((cx + k, cy - r), (cx + r, cy - k), (cx + r, cy)),
        Operation::new("h", vec![]),
    ]
}

fn operations(op: &DrawOp) -> Vec<Operation> {
    match op {
        DrawOp::Text {
            x,
            y,
            size,
            font,
            color,
            text,
        } => vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font_name(*font), real(*size)]),
            Operation::new("rg", color_operands(*color)),
            Operation::new("Td", vec![x_pt(*x), y_pt(*y)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ],
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        } => vec![
            Operation::new("w", vec![real(pt(*width))]),
            Operation::new("RG", color_operands(*color)),
            move_to(*x1, *y1),
            line_to(*x2, *y2),
            Operation::new("S", vec![]),
        ],
        DrawOp::Rect {
            x,
            y,
            w,
            h,
            radius,
            fill,
        } => {
            let mut ops = vec![Operation::new("rg", color_operands(*fill))];
            if *radius > 0.0 {
                ops.extend(rounded_rect_path(*x, *y, *w, *h, *radius));
            } else {
                ops.push(Operation::new(
                    "re",
                    vec![x_pt(*x), y_pt(*y + *h), real(pt(*w)), real(pt(*h))],
                ));
            }
            ops.push(Operation::new("f", vec![]));
            ops
        }
        DrawOp::Circle {
            cx,
            cy,
            r,
            width,
            color,
        } => {
            let mut ops = vec![
                Operation::new("w", vec![real(pt(*width))]),
                Operation::new("RG", color_operands(*color)),
            ];
            ops.extend(circle_path(*cx, *cy, *r));
            ops.push(Operation::new("S", vec![]));
            ops
        }
    }
}

fn font_dictionary(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Serializes `pages` into PDF bytes, one A4 page each.
pub fn render_pdf(pages: &[Page]) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(AppError::Report {
            message: "nothing to render".to_string(),
        });
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font_dictionary("Helvetica"));
    let bold_id = doc.add_object(font_dictionary("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content: Content<Vec<lopdf::content::Operation>> = Content {
            operations: page.ops.iter().flat_map(operations).collect(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            real(pt(PAGE_WIDTH_MM)),
            real(pt(PAGE_HEIGHT_MM)),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    tracing::debug!("Rendered PDF: {} page(s), {} bytes", pages.len(), buffer.len());
    Ok(buffer)
}
