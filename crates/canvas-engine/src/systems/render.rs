use crate::components::entity::Entity;
use crate::components::shape::Shape;
use crate::renderer::command::DrawCommand;
use crate::renderer::traits::Renderer;

/// Draw command for one entity, or `None` if it has no shape.
pub fn draw_command(entity: &Entity) -> Option<DrawCommand> {
    let shape = entity.shape.as_ref()?;
    let pos = entity.body.position();
    let size = entity.body.size();

    let command = match *shape {
        Shape::Rectangle { color } => DrawCommand::rect(pos.x, pos.y, size.x, size.y, color),
        Shape::Sprite { image } => DrawCommand::image(pos.x, pos.y, size.x, size.y, image),
        Shape::Circle { radius, color } => DrawCommand::circle(pos.x, pos.y, radius, color),
    };
    Some(command)
}

/// Clear the surface, then draw entities in iteration order.
pub fn render_frame<'a, R: Renderer + ?Sized>(
    entities: impl Iterator<Item = &'a Entity>,
    width: f32,
    height: f32,
    renderer: &mut R,
) {
    renderer.clear(width, height);
    for entity in entities {
        if let Some(command) = draw_command(entity) {
            renderer.draw(&command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::shape::{Color, ImageId};
    use crate::renderer::command::DrawKind;
    use crate::renderer::traits::DrawBuffer;

    #[test]
    fn frame_keeps_entity_order() {
        let entities = vec![
            Entity::rectangle(EntityId(1), 10.0, 20.0, 5.0, 5.0, Color::WHITE).unwrap(),
            Entity::sprite(EntityId(2), 30.0, 40.0, 8.0, 8.0, ImageId(4)).unwrap(),
            Entity::circle(EntityId(3), 50.0, 60.0, 2.0, Color::BLACK).unwrap(),
        ];

        let mut buffer = DrawBuffer::new();
        render_frame(entities.iter(), 800.0, 600.0, &mut buffer);

        let kinds: Vec<_> = buffer.commands.iter().map(|c| c.draw_kind()).collect();
        assert_eq!(
            kinds,
            vec![Some(DrawKind::Rect), Some(DrawKind::Image), Some(DrawKind::Circle)]
        );
        assert_eq!(buffer.commands[1].style, 4);
        assert_eq!(buffer.surface, (800.0, 600.0));
    }

    #[test]
    fn shapeless_entities_are_skipped() {
        let entities = vec![Entity::new(EntityId(1), 0.0, 0.0, 5.0, 5.0).unwrap()];
        let mut buffer = DrawBuffer::new();
        render_frame(entities.iter(), 800.0, 600.0, &mut buffer);
        assert_eq!(buffer.command_count(), 0);
    }
}
