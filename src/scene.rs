//! Retained-mode scene: records draw calls for inspection and replay.

use crate::config::TextStyle;
use crate::error::Result;
use crate::geometry::{Affine, Point2D, Size};
use crate::surface::{Path, Stroke, Surface, TextMeasurer, TransformStack};

/// One recorded draw call together with the transform that was active when
/// it was issued.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        start: Point2D,
        end: Point2D,
        stroke: Stroke,
        transform: Affine,
    },
    Path {
        path: Path,
        stroke: Stroke,
        transform: Affine,
    },
    Text {
        text: String,
        top_left: Point2D,
        style: TextStyle,
        transform: Affine,
    },
}

impl DrawCommand {
    fn transform(&self) -> Affine {
        match self {
            DrawCommand::Line { transform, .. }
            | DrawCommand::Path { transform, .. }
            | DrawCommand::Text { transform, .. } => *transform,
        }
    }
}

/// Surface that records instead of drawing. Text is measured with `M`.
pub struct Scene<M> {
    size: Size,
    measurer: M,
    transforms: TransformStack,
    commands: Vec<DrawCommand>,
}

impl<M: TextMeasurer> Scene<M> {
    pub fn new(width: f64, height: f64, measurer: M) -> Self {
        Self {
            size: Size::new(width, height),
            measurer,
            transforms: TransformStack::default(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded line endpoints in local coordinates.
    pub fn lines(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line { start, end, .. } => Some((*start, *end)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Text { .. }))
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Path { path, .. } => Some(path),
            _ => None,
        })
    }

    /// Draws every recorded command onto `target`, in order.
    pub fn render<S: Surface + ?Sized>(&self, target: &mut S) -> Result<()> {
        for command in &self.commands {
            let transform = command.transform();
            let scoped = !transform.is_identity();
            if scoped {
                target.push_transform(transform);
            }
            let drawn = match command {
                DrawCommand::Line {
                    start, end, stroke, ..
                } => target.draw_line(*start, *end, stroke),
                DrawCommand::Path { path, stroke, .. } => target.draw_path(path, stroke),
                DrawCommand::Text {
                    text,
                    top_left,
                    style,
                    ..
                } => target.draw_text(text, *top_left, style),
            };
            if scoped {
                target.pop_transform()?;
            }
            drawn?;
        }
        Ok(())
    }
}

impl<M: TextMeasurer> Surface for Scene<M> {
    fn size(&self) -> Size {
        self.size
    }

    fn draw_line(&mut self, start: Point2D, end: Point2D, stroke: &Stroke) -> Result<()> {
        self.commands.push(DrawCommand::Line {
            start,
            end,
            stroke: *stroke,
            transform: self.transforms.current(),
        });
        Ok(())
    }

    fn draw_path(&mut self, path: &Path, stroke: &Stroke) -> Result<()> {
        self.commands.push(DrawCommand::Path {
            path: path.clone(),
            stroke: *stroke,
            transform: self.transforms.current(),
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, top_left: Point2D, style: &TextStyle) -> Result<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            top_left,
            style: *style,
            transform: self.transforms.current(),
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> Result<Size> {
        self.measurer.measure(text, style)
    }

    fn push_transform(&mut self, transform: Affine) {
        self.transforms.push(transform);
    }

    fn pop_transform(&mut self) -> Result<()> {
        self.transforms.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Color;
    use crate::error::ClockError;
    use crate::surface::FixedAdvance;

    fn stroke() -> Stroke {
        Stroke::round(Color::new(1, 2, 3), 1.0)
    }

    #[test]
    fn records_active_transform() {
        let mut scene = Scene::new(100.0, 100.0, FixedAdvance::default());
        scene
            .draw_line(Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0), &stroke())
            .unwrap();
        scene.push_rotation(90.0, Point2D::new(0.0, 0.0));
        scene
            .draw_text("12", Point2D::new(4.0, 4.0), &TextStyle::default())
            .unwrap();
        scene.pop_transform().unwrap();

        assert_eq!(scene.commands().len(), 2);
        assert!(scene.commands()[0].transform().is_identity());
        assert!(!scene.commands()[1].transform().is_identity());
        assert_eq!(scene.texts().count(), 1);
        assert_eq!(scene.lines().count(), 1);
    }

    #[test]
    fn render_replays_into_another_scene() {
        let mut source = Scene::new(50.0, 50.0, FixedAdvance::default());
        source.push_rotation(30.0, Point2D::new(25.0, 25.0));
        source
            .draw_line(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0), &stroke())
            .unwrap();
        source.pop_transform().unwrap();
        let mut path = Path::new();
        path.move_to(Point2D::new(1.0, 1.0))
            .line_to(Point2D::new(2.0, 2.0));
        source.draw_path(&path, &stroke()).unwrap();

        let mut target = Scene::new(50.0, 50.0, FixedAdvance::default());
        source.render(&mut target).unwrap();
        assert_eq!(target.commands(), source.commands());
        assert_eq!(target.transforms.depth(), 0);
    }

    #[test]
    fn unbalanced_pop_is_reported() {
        let mut scene = Scene::new(10.0, 10.0, FixedAdvance::default());
        assert!(matches!(
            scene.pop_transform(),
            Err(ClockError::UnbalancedTransform)
        ));
    }
}
