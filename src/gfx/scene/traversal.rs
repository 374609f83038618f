//! Per-frame scene graph walk
//!
//! Starting at the root, each component pushes the matrix stack, multiplies
//! its local matrix onto it, draws its primitives with the material and
//! texture in effect, recurses into its children and pops again. Material
//! and texture bindings flow down the tree by value, so a shared subgraph
//! reached through two parents is drawn twice with independent state.

use super::graph::{ComponentNode, TextureRef};
use super::renderer::SceneRenderer;
use super::scene::Scene;
use crate::gfx::resources::{Material, Texture};

/// Texture in effect for a subtree
#[derive(Debug, Clone, Copy)]
struct TextureState<'a> {
    texture: Option<&'a Texture>,
    length_s: f32,
    length_t: f32,
}

const UNTEXTURED: TextureState<'static> = TextureState {
    texture: None,
    length_s: 0.0,
    length_t: 0.0,
};

impl<'a> TextureState<'a> {
    /// State for `node`, given the state of its parent
    fn for_node(scene: &'a Scene, node: &ComponentNode, inherited: TextureState<'a>) -> Self {
        let binding = node.texture;
        match binding.reference {
            TextureRef::None => UNTEXTURED,
            TextureRef::Declared(slot) => TextureState {
                texture: scene.textures.by_index(slot).filter(|t| t.is_bindable()),
                length_s: binding.length_s,
                length_t: binding.length_t,
            },
            TextureRef::Inherit => TextureState {
                texture: inherited.texture,
                length_s: if binding.length_s != 0.0 { binding.length_s } else { inherited.length_s },
                length_t: if binding.length_t != 0.0 { binding.length_t } else { inherited.length_t },
            },
        }
    }
}

/// Draws the whole scene once.
///
/// `material_index` picks `materials[index % len]` in every component. The
/// renderer's current matrix is left as it was found.
pub fn display_scene<R: SceneRenderer + ?Sized>(scene: &Scene, renderer: &mut R, material_index: usize) {
    let root = scene.graph.root();
    log::debug!("Traversing scene from '{}'", scene.graph.root_id());

    renderer.push_matrix();
    visit(
        scene,
        renderer,
        material_index,
        root,
        scene.root_material(),
        UNTEXTURED,
    );
    renderer.pop_matrix();
}

fn visit<'a, R: SceneRenderer + ?Sized>(
    scene: &'a Scene,
    renderer: &mut R,
    material_index: usize,
    slot: usize,
    inherited_material: &'a Material,
    inherited_texture: TextureState<'a>,
) {
    let Some(node) = scene.graph.node(slot) else {
        return;
    };

    let material = scene.resolve_material(node.active_material(material_index), inherited_material);
    let texture = TextureState::for_node(scene, node, inherited_texture);

    renderer.push_matrix();
    renderer.multiply_matrix(&node.matrix);

    for primitive in node.primitives.iter().filter_map(|&p| scene.primitives.by_index(p)) {
        renderer.apply_material(material);
        renderer.bind_texture(texture.texture);
        if texture.texture.is_some() {
            if let Some(coords) = primitive.amplified_tex_coords(texture.length_s, texture.length_t) {
                renderer.update_tex_coords(primitive, &coords);
            }
        }
        renderer.display(primitive);
    }

    for &child in &node.children {
        visit(scene, renderer, material_index, child, material, texture);
    }

    renderer.pop_matrix();
}
