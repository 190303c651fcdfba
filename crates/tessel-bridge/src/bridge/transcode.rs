use crate::host::{MaterialId, PrimitiveMode, RenderContext, Tessellator};
use crate::ui::{DrawData, FontAtlasSource, TextureId};

use super::texture::FontTextureManager;

/// Replays toolkit draw data into the host tessellator.
///
/// Every [`DrawCmd`](crate::ui::DrawCmd) becomes exactly one host batch, in
/// source order, bound to the font texture and the configured material.
/// Triangles are emitted with reversed winding and positions divided by the
/// host GUI scale.
#[derive(Debug)]
pub struct Transcoder {
    material: MaterialId,
    warned_foreign_texture: bool,
}

impl Transcoder {
    pub fn new(material: MaterialId) -> Self {
        Self { material, warned_foreign_texture: false }
    }

    #[inline]
    pub fn material(&self) -> &MaterialId {
        &self.material
    }

    /// # Panics
    /// Panics if a command references indices or vertices outside its list.
    pub fn submit<C: RenderContext>(
        &mut self,
        draw_data: &DrawData,
        textures: &mut FontTextureManager,
        atlas: &mut impl FontAtlasSource,
        ctx: &mut C,
    ) {
        let texture = textures.ensure_font_texture(atlas, ctx).handle().clone();
        let font_tex_id = TextureId(texture.id());

        let gui_scale = ctx.gui_metrics().gui_scale;
        let scale = if gui_scale > 0.0 && gui_scale.is_finite() { gui_scale } else { 1.0 };

        for list in &draw_data.cmd_lists {
            for cmd in &list.cmd_buffer {
                if cmd.texture_id != font_tex_id && !self.warned_foreign_texture {
                    log::debug!(
                        "draw command references texture {:?}; binding font texture {}",
                        cmd.texture_id,
                        texture.id()
                    );
                    self.warned_foreign_texture = true;
                }

                ctx.set_clip_rect(Some(cmd.clip_rect.scaled_down(scale)));

                let tess = ctx.tessellator();
                tess.begin(PrimitiveMode::TriangleList, 0);

                let vertices = &list.vtx_buffer[cmd.vtx_offset as usize..];
                for tri in list.indices(cmd).chunks_exact(3) {
                    for &idx in tri.iter().rev() {
                        let v = &vertices[idx as usize];
                        tess.color(v.col);
                        tess.vertex_uv(v.pos.x / scale, v.pos.y / scale, 0.0, v.uv.x, v.uv.y);
                    }
                }

                ctx.render_mesh_immediately(&self.material, &texture);
            }
        }

        if draw_data.total_cmd_count() > 0 {
            ctx.set_clip_rect(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::{Rect, Vec2};
    use crate::host::recording::{HostCall, RecordingHost};
    use crate::host::ResourceLocation;
    use crate::paint::PackedColor;
    use crate::ui::{DrawCmd, DrawCmdList, DrawVert, FontAtlas};

    use super::*;

    const RED: u32 = 0xff00_00ff;
    const GREEN: u32 = 0xff00_ff00;

    struct Fixture {
        transcoder: Transcoder,
        textures: FontTextureManager,
        atlas: FontAtlas,
        host: RecordingHost,
    }

    impl Fixture {
        fn new(gui_scale: f32) -> Self {
            Self {
                transcoder: Transcoder::new(MaterialId::new("ui_texture_and_color_blur")),
                textures: FontTextureManager::new(ResourceLocation::new("imgui_font")),
                atlas: FontAtlas::new(),
                host: RecordingHost::new(Vec2::new(800.0, 600.0), gui_scale),
            }
        }

        fn submit(&mut self, data: &DrawData) {
            self.transcoder.submit(data, &mut self.textures, &mut self.atlas, &mut self.host);
        }

        fn ensure(&mut self) {
            self.textures.ensure_font_texture(&mut self.atlas, &mut self.host);
        }
    }

    fn vert(x: f32, y: f32, u: f32, v: f32, col: u32) -> DrawVert {
        DrawVert::new(Vec2::new(x, y), Vec2::new(u, v), col)
    }

    fn cmd(idx_offset: u32, elem_count: u32) -> DrawCmd {
        DrawCmd {
            clip_rect: Rect::new(0.0, 0.0, 800.0, 600.0),
            texture_id: TextureId::NONE,
            vtx_offset: 0,
            idx_offset,
            elem_count,
        }
    }

    fn data(lists: Vec<DrawCmdList>) -> DrawData {
        DrawData { display_pos: Vec2::zero(), display_size: Vec2::new(800.0, 600.0), cmd_lists: lists }
    }

    fn triangle_list(col: u32) -> DrawCmdList {
        DrawCmdList::new(
            vec![vert(0.0, 0.0, 0.1, 0.2, col), vert(10.0, 0.0, 0.3, 0.4, col), vert(0.0, 10.0, 0.5, 0.6, col)],
            vec![0, 1, 2],
            vec![cmd(0, 3)],
        )
    }

    #[test]
    fn single_triangle_at_scale_two_is_reversed_and_scaled() {
        let mut f = Fixture::new(2.0);
        f.submit(&data(vec![triangle_list(RED)]));

        let batches = f.host.batches();
        assert_eq!(batches.len(), 1);
        let b = &batches[0];
        assert_eq!(b.mode, PrimitiveMode::TriangleList);
        assert_eq!(b.material.as_str(), "ui_texture_and_color_blur");
        assert_eq!(Some(&b.texture), f.textures.texture().map(|t| t.handle()));

        let pos: Vec<_> = b.vertices.iter().map(|v| v.pos).collect();
        assert_eq!(pos, vec![Vec2::new(0.0, 5.0), Vec2::new(5.0, 0.0), Vec2::new(0.0, 0.0)]);
        let uv: Vec<_> = b.vertices.iter().map(|v| v.uv).collect();
        assert_eq!(uv, vec![Vec2::new(0.5, 0.6), Vec2::new(0.3, 0.4), Vec2::new(0.1, 0.2)]);
        assert!(b.vertices.iter().all(|v| v.color == RED));
    }

    #[test]
    fn every_triangle_keeps_count_and_reverses_order() {
        let mut f = Fixture::new(1.0);
        let verts: Vec<_> = (0..6).map(|i| vert(i as f32, 0.0, 0.0, 0.0, RED)).collect();
        let list = DrawCmdList::new(verts, vec![0, 1, 2, 3, 4, 5, 5, 0, 3], vec![cmd(0, 9)]);
        f.submit(&data(vec![list]));

        let xs: Vec<f32> = f.host.batches()[0].vertices.iter().map(|v| v.pos.x).collect();
        assert_eq!(xs, vec![2.0, 1.0, 0.0, 5.0, 4.0, 3.0, 3.0, 0.0, 5.0]);
    }

    #[test]
    fn color_precedes_each_vertex() {
        let mut f = Fixture::new(1.0);
        f.ensure();
        f.host.clear_calls();
        f.submit(&data(vec![triangle_list(GREEN)]));

        let tess: Vec<_> = f.host.calls.iter().filter(|c| c.is_tessellator()).collect();
        assert_eq!(tess.len(), 1 + 3 * 2);
        assert_eq!(*tess[0], HostCall::Begin(PrimitiveMode::TriangleList));
        for pair in tess[1..].chunks(2) {
            assert_eq!(*pair[0], HostCall::Color(GREEN));
            assert!(matches!(pair[1], HostCall::VertexUv { z, .. } if *z == 0.0));
        }
    }

    #[test]
    fn one_batch_per_command_in_paint_order_across_lists() {
        let mut f = Fixture::new(1.0);
        let mut first = triangle_list(RED);
        first.vtx_buffer.extend(first.vtx_buffer.clone());
        first.idx_buffer.extend([0, 1, 2]);
        first.cmd_buffer = vec![cmd(0, 3), cmd(3, 3)];
        first.cmd_buffer[1].vtx_offset = 3;
        first.cmd_buffer[1].clip_rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        f.submit(&data(vec![first, triangle_list(GREEN)]));

        let batches = f.host.batches();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].vertices[0].color, RED);
        assert_eq!(batches[1].vertices[0].color, RED);
        assert_eq!(batches[2].vertices[0].color, GREEN);

        let clips: Vec<_> = f
            .host
            .calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Clip(clip) => Some(*clip),
                _ => None,
            })
            .collect();
        assert_eq!(
            clips,
            vec![
                Some(Rect::new(0.0, 0.0, 800.0, 600.0)),
                Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
                Some(Rect::new(0.0, 0.0, 800.0, 600.0)),
                None,
            ]
        );
    }

    #[test]
    fn vertex_offset_rebases_indices() {
        let mut f = Fixture::new(1.0);
        let mut list = triangle_list(RED);
        list.vtx_buffer.insert(0, vert(99.0, 99.0, 0.0, 0.0, GREEN));
        list.cmd_buffer[0].vtx_offset = 1;
        f.submit(&data(vec![list]));

        let b = &f.host.batches()[0];
        assert!(b.vertices.iter().all(|v| v.color == RED));
        assert_eq!(b.vertices[2].pos, Vec2::zero());
    }

    #[test]
    fn empty_command_still_flushes_a_batch() {
        let mut f = Fixture::new(1.0);
        let mut list = triangle_list(RED);
        list.cmd_buffer.push(cmd(3, 0));
        f.submit(&data(vec![list]));

        let batches = f.host.batches();
        assert_eq!(batches.len(), 2);
        assert!(batches[1].vertices.is_empty());
    }

    #[test]
    fn stale_texture_is_refreshed_before_any_geometry() {
        let mut f = Fixture::new(1.0);
        f.ensure();
        f.textures.mark_unloaded();
        f.host.clear_calls();

        f.submit(&data(vec![triangle_list(RED)]));

        assert_eq!(f.host.upload_count(), 1);
        let first_tess = f.host.calls.iter().position(HostCall::is_tessellator);
        let last_tex = f.host.calls.iter().rposition(HostCall::is_texture_access);
        assert!(last_tex < first_tess);
        assert!(f.textures.is_valid());
        assert_eq!(f.host.batches()[0].texture.id(), f.atlas.tex_id().0);
    }

    #[test]
    fn first_submit_uploads_once() {
        let mut f = Fixture::new(1.0);
        f.submit(&data(vec![triangle_list(RED)]));
        f.submit(&data(vec![triangle_list(RED)]));
        assert_eq!(f.host.upload_count(), 1);
        assert_eq!(f.host.begin_count(), 2);
    }

    #[test]
    fn empty_draw_data_touches_nothing() {
        let mut f = Fixture::new(1.0);
        f.ensure();
        f.host.clear_calls();

        f.submit(&data(Vec::new()));
        assert!(f.host.batches().is_empty());
        assert!(f.host.calls.is_empty());
    }

    #[test]
    fn invalid_scale_falls_back_to_identity() {
        let mut f = Fixture::new(0.0);
        f.submit(&data(vec![triangle_list(RED)]));
        assert_eq!(f.host.batches()[0].vertices[1].pos, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn transcodes_toolkit_output() {
        use crate::ui::{DrawFlags, UiContext};

        let mut ui = UiContext::default();
        ui.io_mut().display_size = Vec2::new(200.0, 100.0);
        ui.new_frame();
        ui.background_draw_list().add_rect_filled(
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 20.0),
            PackedColor::WHITE,
            0.0,
            DrawFlags::empty(),
        );
        let draw_data = ui.render();

        let mut f = Fixture::new(2.0);
        f.transcoder.submit(&draw_data, &mut f.textures, ui.fonts_mut(), &mut f.host);

        let batches = f.host.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].vertices.len(), 6);
        // Quad indices 0,1,2 reversed: c, b, a.
        assert_eq!(batches[0].vertices[0].pos, Vec2::new(10.0, 10.0));
        assert_eq!(batches[0].vertices[2].pos, Vec2::new(5.0, 5.0));
    }
}
