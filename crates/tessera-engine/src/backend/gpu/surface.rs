use winit::dpi::PhysicalSize;

use super::{SurfaceErrorAction, VerticalSync};

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    let preferred: [wgpu::TextureFormat; 2] = if prefer_srgb {
        [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ]
    } else {
        [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Rgba8Unorm,
        ]
    };
    for f in preferred {
        if caps.formats.contains(&f) {
            return Some(f);
        }
    }

    Some(caps.formats[0])
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// First supported mode of the preference list; `Fifo` is always available.
pub(crate) fn choose_present_mode(
    supported: &[wgpu::PresentMode],
    vsync: VerticalSync,
) -> wgpu::PresentMode {
    use wgpu::PresentMode::*;

    let preference: &[wgpu::PresentMode] = match vsync {
        VerticalSync::Adaptive => &[FifoRelaxed, Fifo],
        VerticalSync::Enabled => &[Fifo],
        VerticalSync::Disabled => &[Immediate, Mailbox, Fifo],
    };

    preference
        .iter()
        .copied()
        .find(|m| supported.contains(m))
        .unwrap_or(Fifo)
}

pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;

    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::PresentMode;

    #[test]
    fn adaptive_falls_back_to_fifo() {
        assert_eq!(
            choose_present_mode(&[PresentMode::Fifo, PresentMode::Immediate], VerticalSync::Adaptive),
            PresentMode::Fifo
        );
        assert_eq!(
            choose_present_mode(&[PresentMode::FifoRelaxed, PresentMode::Fifo], VerticalSync::Adaptive),
            PresentMode::FifoRelaxed
        );
    }

    #[test]
    fn disabled_prefers_immediate_then_mailbox() {
        assert_eq!(
            choose_present_mode(&[PresentMode::Mailbox, PresentMode::Fifo], VerticalSync::Disabled),
            PresentMode::Mailbox
        );
        assert_eq!(
            choose_present_mode(&[PresentMode::Fifo], VerticalSync::Disabled),
            PresentMode::Fifo
        );
    }
}
