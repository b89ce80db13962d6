use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Shrink so neither side exceeds `max_dimension`, keeping the aspect ratio
pub fn clamp_to_limit(image: RgbaImage, max_dimension: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let longest = w.max(h);
    if longest <= max_dimension || max_dimension == 0 {
        return image;
    }

    let ratio = max_dimension as f64 / longest as f64;
    let new_w = ((w as f64 * ratio).round() as u32).clamp(1, max_dimension);
    let new_h = ((h as f64 * ratio).round() as u32).clamp(1, max_dimension);
    log::warn!(
        "Image {}x{} exceeds texture limit {}, downscaling to {}x{}",
        w,
        h,
        max_dimension,
        new_w,
        new_h
    );
    imageops::resize(&image, new_w, new_h, FilterType::Triangle)
}

pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Level 0 is the input; each following level halves both sides (min 1)
pub fn build_mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height());
    let mut chain = Vec::with_capacity(levels as usize);
    chain.push(base);

    for _ in 1..levels {
        let prev = &chain[chain.len() - 1];
        let w = (prev.width() / 2).max(1);
        let h = (prev.height() / 2).max(1);
        let next = imageops::resize(prev, w, h, FilterType::Triangle);
        chain.push(next);
    }

    chain
}

/// Downscaled-to-fit mip levels, built off the render thread. Never empty.
#[derive(Debug, Clone)]
pub struct MipChain {
    levels: Vec<RgbaImage>,
}

impl MipChain {
    pub fn new(image: RgbaImage, max_dimension: u32) -> Self {
        Self {
            levels: build_mip_chain(clamp_to_limit(image, max_dimension)),
        }
    }

    pub fn levels(&self) -> &[RgbaImage] {
        &self.levels
    }

    /// Size of level 0
    pub fn dimensions(&self) -> (u32, u32) {
        self.levels[0].dimensions()
    }
}

pub fn solid_color(color: [f32; 3]) -> RgbaImage {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    RgbaImage::from_pixel(
        1,
        1,
        Rgba([to_byte(color[0]), to_byte(color[1]), to_byte(color[2]), 255]),
    )
}

/// GPU texture plus the view bound in shaders
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub size: (u32, u32),
}

impl GpuTexture {
    /// Only copies texels; all resizing happened when the chain was built
    pub fn from_mips(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mips: &MipChain,
        label: &str,
    ) -> Self {
        let size = mips.dimensions();
        let chain = mips.levels();

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: chain.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in chain.iter().enumerate() {
            let (w, h) = mip.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                mip.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * w),
                    rows_per_image: Some(h),
                },
                wgpu::Extent3d {
                    width: w,
                    height: h,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size,
        }
    }

    /// Clamp-to-edge, trilinear
    pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Picture Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        })
    }
}
