use std::collections::{HashMap, HashSet};

use image::RgbaImage;
use wgpu::util::DeviceExt;

/// Region name of the solid white block that untextured shapes sample.
pub const WHITE: &str = "white";
/// Region name of the font image.
pub const FONT: &str = "font";

/// Transparent border around every packed image so linear filtering never
/// bleeds a neighbour in.
const GUTTER: u32 = 1;
const WHITE_SIZE: u32 = 4;
const MIN_ATLAS_WIDTH: u32 = 1024;

// ── AtlasRegion ──────────────────────────────────────────────────────────────

/// UV rectangle of one named image inside the atlas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtlasRegion {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

impl AtlasRegion {
    /// Map a UV inside the source image (`[0, 1]²`) into atlas UV space.
    pub fn remap(&self, uv: [f32; 2]) -> [f32; 2] {
        [
            self.uv_min[0] + (self.uv_max[0] - self.uv_min[0]) * uv[0],
            self.uv_min[1] + (self.uv_max[1] - self.uv_min[1]) * uv[1],
        ]
    }

    pub fn center(&self) -> [f32; 2] {
        self.remap([0.5, 0.5])
    }
}

// ── Shelf packing (pure, GPU-free) ───────────────────────────────────────────

/// One image's position inside the packed atlas.
#[derive(Debug, PartialEq)]
pub(crate) struct PlacedSprite {
    pub name: String,
    /// Top-left pixel coordinate inside the atlas.
    pub atlas_x: u32,
    pub atlas_y: u32,
    /// Pixel dimensions of this image.
    pub pixel_w: u32,
    pub pixel_h: u32,
}

/// Pure shelf-packing algorithm: no I/O, no GPU.
///
/// `items` is a slice of `(name, pixel_w, pixel_h)`.  Duplicate names are
/// skipped (only the first occurrence is packed).  Items wider than
/// `max_width` are skipped with a warning.
///
/// Returns `(placements, atlas_pixel_width, atlas_pixel_height)`.  Both
/// atlas dimensions are rounded up to the next power of two.
pub(crate) fn pack(items: &[(String, u32, u32)], max_width: u32) -> (Vec<PlacedSprite>, u32, u32) {
    // Sort by height descending for better shelf utilisation.
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| items[b].2.cmp(&items[a].2));

    let mut placed_names: HashSet<&str> = HashSet::new();
    let mut placements: Vec<PlacedSprite> = Vec::new();
    let mut cur_x = 0u32;
    let mut cur_y = 0u32;
    let mut row_h = 0u32;

    for &i in &order {
        let (ref name, w, h) = items[i];

        if !placed_names.insert(name.as_str()) {
            continue;
        }

        if w > max_width {
            log::warn!("[atlas] '{name}' is wider ({w}px) than the atlas ({max_width}px); skipping");
            continue;
        }

        if cur_x + w > max_width {
            // Start a new shelf.
            cur_y += row_h;
            cur_x = 0;
            row_h = 0;
        }

        placements.push(PlacedSprite {
            name: name.clone(),
            atlas_x: cur_x,
            atlas_y: cur_y,
            pixel_w: w,
            pixel_h: h,
        });
        cur_x += w;
        row_h = row_h.max(h);
    }

    let used_h = cur_y + row_h;
    let atlas_h = used_h.next_power_of_two().max(1);
    let atlas_w = max_width.next_power_of_two();
    (placements, atlas_w, atlas_h)
}

// ── bake (pure) ──────────────────────────────────────────────────────────────

/// The composited atlas image and where each named image landed.
pub struct BakedAtlas {
    pub image: RgbaImage,
    pub regions: HashMap<String, AtlasRegion>,
}

impl BakedAtlas {
    pub fn region(&self, name: &str) -> Option<&AtlasRegion> {
        self.regions.get(name)
    }

    /// UV of the white block.  Always present after [`bake`].
    pub fn white_uv(&self) -> [f32; 2] {
        self.regions.get(WHITE).map_or([0.0, 0.0], AtlasRegion::center)
    }
}

/// Pack `images` plus a white block into one RGBA image.
///
/// Names must be unique; a later duplicate of a name is dropped.  The name
/// [`WHITE`] is reserved.
pub fn bake(images: &[(String, RgbaImage)]) -> BakedAtlas {
    let white = RgbaImage::from_pixel(WHITE_SIZE, WHITE_SIZE, image::Rgba([255, 255, 255, 255]));

    let mut sources: Vec<(&str, &RgbaImage)> = vec![(WHITE, &white)];
    let mut seen: HashSet<&str> = HashSet::from([WHITE]);
    for (name, img) in images {
        if !seen.insert(name.as_str()) {
            log::warn!("[atlas] duplicate image name '{name}'; skipping");
            continue;
        }
        sources.push((name.as_str(), img));
    }

    let dims: Vec<(String, u32, u32)> = sources
        .iter()
        .map(|(name, img)| (name.to_string(), img.width() + GUTTER * 2, img.height() + GUTTER * 2))
        .collect();
    let widest = dims.iter().map(|d| d.1).max().unwrap_or(0);
    let (placements, atlas_w, atlas_h) = pack(&dims, widest.max(MIN_ATLAS_WIDTH));

    let lookup: HashMap<&str, &RgbaImage> = sources.iter().copied().collect();
    let mut atlas_img = RgbaImage::new(atlas_w, atlas_h);
    let mut regions = HashMap::new();

    for p in &placements {
        let Some(img) = lookup.get(p.name.as_str()) else { continue };
        let (x0, y0) = (p.atlas_x + GUTTER, p.atlas_y + GUTTER);
        image::imageops::replace(&mut atlas_img, *img, x0 as i64, y0 as i64);

        let (w, h) = img.dimensions();
        regions.insert(p.name.clone(), AtlasRegion {
            uv_min: [x0 as f32 / atlas_w as f32, y0 as f32 / atlas_h as f32],
            uv_max: [(x0 + w) as f32 / atlas_w as f32, (y0 + h) as f32 / atlas_h as f32],
        });
    }

    log::debug!("[atlas] baked {} images into {atlas_w}x{atlas_h}", regions.len());
    BakedAtlas { image: atlas_img, regions }
}

// ── SpriteAtlas (GPU) ────────────────────────────────────────────────────────

pub struct SpriteAtlas {
    pub baked: BakedAtlas,
    pub texture_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl SpriteAtlas {
    /// Bake `images` and upload the result.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, images: &[(String, RgbaImage)]) -> Self {
        let baked = bake(images);
        let (texture_view, sampler) = Self::upload(device, queue, &baked.image);
        Self { baked, texture_view, sampler }
    }

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &RgbaImage,
    ) -> (wgpu::TextureView, wgpu::Sampler) {
        let (w, h) = img.dimensions();
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("sprite_atlas_tex"),
                size: wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                // Colours stay in sRGB space end to end, matching the surface.
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            img.as_raw(),
        );
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        (texture_view, sampler)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
