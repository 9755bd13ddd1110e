use anyhow::{Result, anyhow, bail};
use crossbeam_channel::{Receiver, bounded};

/// Copies a region of `texture` into tightly packed RGBA8 rows.
///
/// Blocks until the GPU has finished the copy. BGRA sources are swizzled.
pub(crate) fn read_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    format: wgpu::TextureFormat,
    origin: (u32, u32),
    size: (u32, u32),
) -> Result<Vec<u8>> {
    let (width, height) = size;
    if width == 0 || height == 0 {
        bail!("cannot read an empty region: {width}x{height}");
    }

    let swizzle = match format {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => false,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => true,
        other => bail!("unsupported format {other:?} for readback"),
    };

    let bytes_per_row = 4 * width;
    let padded_bytes_per_row = bytes_per_row.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
        * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("tessera readback buffer"),
        size: padded_bytes_per_row as u64 * height as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("tessera readback encoder"),
    });

    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: origin.0,
                y: origin.1,
                z: 0,
            },
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(Some(encoder.finish()));

    let slice = buffer.slice(..);
    let (tx, rx) = bounded(1);
    slice.map_async(wgpu::MapMode::Read, move |res| {
        let _ = tx.send(res);
    });
    device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|e| anyhow!("device poll failed during readback: {e}"))?;

    map_result(&rx)?;

    let data = slice.get_mapped_range();
    let mut pixels = Vec::with_capacity(bytes_per_row as usize * height as usize);
    for row in 0..height as usize {
        let start = row * padded_bytes_per_row as usize;
        pixels.extend_from_slice(&data[start..start + bytes_per_row as usize]);
    }
    drop(data);
    buffer.unmap();

    if swizzle {
        for px in pixels.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
    }

    Ok(pixels)
}

/// Result of the `map_async` callback. A dropped callback is an error, not a hang.
fn map_result(rx: &Receiver<Result<(), wgpu::BufferAsyncError>>) -> Result<()> {
    match rx.recv() {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(anyhow!("failed to map readback buffer: {e}")),
        Err(_) => Err(anyhow!("readback map callback dropped without a result")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_buffer_is_ok() {
        let (tx, rx) = bounded(1);
        tx.send(Ok(())).unwrap();
        assert!(map_result(&rx).is_ok());
    }

    #[test]
    fn dropped_callback_returns_error() {
        let (tx, rx) = bounded::<Result<(), wgpu::BufferAsyncError>>(1);
        drop(tx);
        let err = map_result(&rx).unwrap_err();
        assert!(format!("{err}").contains("dropped"));
    }
}
