//! Rendering collaborator interfaces.
//!
//! The terrain and noise pipeline produces plain buffers; a graphics backend
//! implements these traits to receive them. Global render state that a draw
//! call changes is overridden through a guard that restores it on drop, so
//! sibling draw calls never inherit it.

use std::ops::{Deref, DerefMut};

use crate::terrain::Vertex;

/// Receives RGB8 texture uploads
pub trait TextureSink {
    type Texture;

    /// Upload `width * height * 3` tightly packed RGB bytes
    fn upload_rgb8(&mut self, width: u32, height: u32, pixels: &[u8]) -> Self::Texture;
}

/// Receives indexed triangle meshes and draws them
pub trait MeshSink {
    type Mesh;

    fn upload_mesh(&mut self, vertices: &[Vertex], indices: &[u32]) -> Self::Mesh;

    fn draw_indexed(&mut self, mesh: &Self::Mesh, index_count: u32);
}

/// Which faces are discarded when culling is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    Front,
    #[default]
    Back,
    FrontAndBack,
}

/// Face culling state of a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CullState {
    pub enabled: bool,
    pub mode: CullMode,
}

/// Global render state that draw calls may temporarily override
pub trait RenderState {
    fn cull_state(&self) -> CullState;

    fn set_cull_state(&mut self, state: CullState);
}

/// Disables face culling for as long as it lives, then restores the state
/// that was active when it was created
///
/// Derefs to the wrapped backend so draw calls go through the guard.
pub struct CullFaceOverride<'a, R: RenderState + ?Sized> {
    target: &'a mut R,
    saved: CullState,
}

impl<'a, R: RenderState + ?Sized> CullFaceOverride<'a, R> {
    pub fn disable(target: &'a mut R) -> Self {
        let saved = target.cull_state();
        target.set_cull_state(CullState {
            enabled: false,
            ..saved
        });
        Self { target, saved }
    }

    /// State that will be restored on drop
    pub fn saved(&self) -> CullState {
        self.saved
    }
}

impl<R: RenderState + ?Sized> Deref for CullFaceOverride<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        &*self.target
    }
}

impl<R: RenderState + ?Sized> DerefMut for CullFaceOverride<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut *self.target
    }
}

impl<R: RenderState + ?Sized> Drop for CullFaceOverride<'_, R> {
    fn drop(&mut self) {
        self.target.set_cull_state(self.saved);
    }
}

/// Recording backend for tests
#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        UploadTexture { width: u32, height: u32, bytes: usize },
        UploadMesh { vertices: usize, indices: usize },
        Draw { mesh: usize, index_count: u32, cull: CullState },
        SetCull(CullState),
    }

    #[derive(Debug, Default)]
    pub struct RecordingBackend {
        pub cull: CullState,
        pub calls: Vec<Call>,
        next_handle: usize,
    }

    impl RecordingBackend {
        pub fn with_cull(cull: CullState) -> Self {
            Self {
                cull,
                ..Self::default()
            }
        }

        fn handle(&mut self) -> usize {
            self.next_handle += 1;
            self.next_handle
        }
    }

    impl TextureSink for RecordingBackend {
        type Texture = usize;

        fn upload_rgb8(&mut self, width: u32, height: u32, pixels: &[u8]) -> usize {
            self.calls.push(Call::UploadTexture {
                width,
                height,
                bytes: pixels.len(),
            });
            self.handle()
        }
    }

    impl MeshSink for RecordingBackend {
        type Mesh = usize;

        fn upload_mesh(&mut self, vertices: &[Vertex], indices: &[u32]) -> usize {
            self.calls.push(Call::UploadMesh {
                vertices: vertices.len(),
                indices: indices.len(),
            });
            self.handle()
        }

        fn draw_indexed(&mut self, mesh: &usize, index_count: u32) {
            self.calls.push(Call::Draw {
                mesh: *mesh,
                index_count,
                cull: self.cull,
            });
        }
    }

    impl RenderState for RecordingBackend {
        fn cull_state(&self) -> CullState {
            self.cull
        }

        fn set_cull_state(&mut self, state: CullState) {
            self.cull = state;
            self.calls.push(Call::SetCull(state));
        }
    }
}
