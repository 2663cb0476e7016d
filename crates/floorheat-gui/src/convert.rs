use floorheat_core::compose::Color;
use floorheat_core::geometry::Point;
use image::RgbaImage;

/// Upload-ready copy of a straight-alpha RGBA8 image.
pub fn rgba_to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

pub fn color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
}

pub fn to_point(v: egui::Vec2) -> Point {
    Point::new(v.x, v.y)
}

pub fn to_vec2(p: Point) -> egui::Vec2 {
    egui::vec2(p.x, p.y)
}
