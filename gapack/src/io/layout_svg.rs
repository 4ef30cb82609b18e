use garn_rs::entities::Fabric;
use garn_rs::geometry::primitives::SPolygon;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Path, Rectangle};

const PIECE_FILLS: [&str; 8] = [
    "#8DD3C7", "#FFFFB3", "#BEBADA", "#FB8072", "#80B1D3", "#FDB462", "#B3DE69", "#FCCDE5",
];

/// Renders the fabric and the placed polygons for human inspection.
pub fn layout_to_svg(polys: &[SPolygon], fabric: &Fabric) -> Document {
    let stroke_width = f64::max(fabric.width, fabric.height) / 500.0;

    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, fabric.width, fabric.height))
        .add(
            Rectangle::new()
                .set("x", 0.0)
                .set("y", 0.0)
                .set("width", fabric.width)
                .set("height", fabric.height)
                .set("fill", "lightgray")
                .set("fill-opacity", 0.3),
        );

    for (i, poly) in polys.iter().enumerate() {
        let mut data = Data::new().move_to((poly.points[0].x(), poly.points[0].y()));
        for point in &poly.points[1..] {
            data = data.line_to((point.x(), point.y()));
        }
        data = data.close();

        document = document.add(
            Path::new()
                .set("d", data)
                .set("fill", PIECE_FILLS[i % PIECE_FILLS.len()])
                .set("fill-opacity", 0.85)
                .set("stroke", "black")
                .set("stroke-width", stroke_width),
        );
    }

    document
}
