//! Example: Building a drawing from the scene model
//!
//! Elements are added through the sync controller, the generated code is
//! printed, then a hand edit of the code is fed back and the rebuilt scene
//! is rendered to SVG.

use tikzsync::{
    Renderer,
    color::Color,
    config::AppConfig,
    geometry::Point,
    scene::{ArrowHead, AxisConfig, Domain, ElementSpec, Style},
    sync::SyncController,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = SyncController::new();

    controller.add_element(
        ElementSpec::circle(Point::new(0.0, 0.0), 1.5)
            .with_style(Style::default().with_fill(Color::new("#ffcc00")?)),
    );
    controller.add_element(
        ElementSpec::line(Point::new(-2.0, 0.0), Point::new(2.0, 0.0))
            .with_style(Style::default().with_arrow_head(ArrowHead::Forward)),
    );
    controller.add_element(ElementSpec::plot(
        "sin(x)",
        AxisConfig::new(Domain::new(-3.0, 3.0), 60, true),
    ));

    println!("Generated code:\n{}\n", controller.code());

    // A hand edit: the typed text is kept as is and the scene follows it.
    let edited = controller.code().replace("circle (1.5cm)", "circle (1cm)");
    controller.edit_text(edited);
    println!("Scene now holds {} elements", controller.scene().len());

    let svg = Renderer::new(AppConfig::default()).render_svg(controller.scene())?;
    println!("Rendered {} bytes of SVG", svg.len());

    Ok(())
}
