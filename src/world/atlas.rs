//! Fixed-size pixel atlases the raycaster samples from.
//!
//! Wall atlases pack square tiles horizontally by texture id (id 1 is the
//! leftmost tile).  Floor and ceiling atlases hold a single tile.  The sky
//! atlas is a full-width panorama mapped by facing angle.
//!
//! The asset-loading collaborator is expected to decode real images into
//! these buffers; [`AtlasSet::fallback`] provides procedural stand-ins so a
//! missing asset degrades to an ugly frame instead of a crash.

use crate::renderer::Rgba;
use crate::world::grid::TileId;

/// Things that can go wrong when building an atlas.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AtlasError {
    #[error("tile size must be non-zero")]
    TileSizeZero,

    /// Tile size must divide both dimensions exactly.
    #[error("tile size {tile_size} does not divide atlas {width}x{height}")]
    NotDivisible {
        tile_size: usize,
        width: usize,
        height: usize,
    },

    #[error("expected {expected} pixels, got {got}")]
    PixelCountMismatch { expected: usize, got: usize },
}

/// CPU-side pixel grid in 0xAARRGGBB, row-major.
///
/// Sampling clamps in-tile coordinates into range; feeding it a texture id
/// of 0 is a caller bug (checked in debug builds only, callers branch on
/// the id before sampling).
#[derive(Clone, Debug)]
pub struct TextureAtlas {
    width: usize,
    height: usize,
    tile_size: usize,
    pixels: Vec<Rgba>,
}

impl TextureAtlas {
    pub fn new(
        width: usize,
        height: usize,
        tile_size: usize,
        pixels: Vec<Rgba>,
    ) -> Result<Self, AtlasError> {
        if tile_size == 0 {
            return Err(AtlasError::TileSizeZero);
        }
        if width % tile_size != 0 || height % tile_size != 0 {
            return Err(AtlasError::NotDivisible {
                tile_size,
                width,
                height,
            });
        }
        if pixels.len() != width * height {
            return Err(AtlasError::PixelCountMismatch {
                expected: width * height,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tile_size,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// How many tiles are packed horizontally.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.width / self.tile_size
    }

    /// Raw texel at absolute atlas coordinates, clamped into range.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Rgba {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[x + y * self.width]
    }

    /// Texel `(tx, ty)` inside the tile packed at `id` (1-based).
    ///
    /// In-tile coordinates are clamped to the tile, and ids past the last
    /// packed tile wrap around so a sloppy map still renders.
    #[inline]
    pub fn wall_texel(&self, id: TileId, tx: usize, ty: usize) -> Rgba {
        debug_assert!(id > 0, "texture id 0 must never be sampled");
        let slot = (id.max(1) as usize - 1) % self.tile_count();
        let tx = tx.min(self.tile_size - 1);
        let ty = ty.min(self.tile_size - 1);
        self.pixels[tx + slot * self.tile_size + ty * self.width]
    }

    /// Texel inside a single-tile (floor/ceiling) atlas.
    #[inline]
    pub fn flat_texel(&self, tx: usize, ty: usize) -> Rgba {
        let tx = tx.min(self.tile_size - 1);
        let ty = ty.min(self.tile_size - 1);
        self.pixels[tx + ty * self.width]
    }

    /*──────────────────── procedural fallbacks ────────────────────*/

    /// 8-tile wall atlas, 64 px tiles, one two-tone pattern per id.
    pub fn fallback_walls() -> Self {
        const TILE: usize = 64;
        const TILES: usize = 8;
        let width = TILE * TILES;
        let mut pixels = vec![0u32; width * TILE];
        for slot in 0..TILES {
            let (a, b) = FALLBACK_WALL_COLORS[slot];
            for y in 0..TILE {
                for x in 0..TILE {
                    let lit = match slot % 4 {
                        0 => (x / 8 + y / 8) % 2 == 0, // checker
                        1 => (x / 4) % 2 == 0,         // vertical stripes
                        2 => (y / 4) % 2 == 0,         // horizontal stripes
                        _ => ((x ^ y) & 16) == 0,      // xor weave
                    };
                    pixels[x + slot * TILE + y * width] = if lit { a } else { b };
                }
            }
        }
        Self::new(width, TILE, TILE, pixels).expect("fallback wall atlas is well-formed")
    }

    /// Single-tile flat atlas in two alternating tones.
    pub fn fallback_flat(a: Rgba, b: Rgba) -> Self {
        const TILE: usize = 64;
        let mut pixels = vec![0u32; TILE * TILE];
        for y in 0..TILE {
            for x in 0..TILE {
                pixels[x + y * TILE] = if (x / 8 + y / 8) % 2 == 0 { a } else { b };
            }
        }
        Self::new(TILE, TILE, TILE, pixels).expect("fallback flat atlas is well-formed")
    }

    /// 512x128 panorama: vertical dusk gradient with a few dithered stars.
    pub fn fallback_sky() -> Self {
        const W: usize = 512;
        const H: usize = 128;
        let mut pixels = vec![0u32; W * H];
        for y in 0..H {
            let t = y as u32 * 255 / (H - 1) as u32;
            let r = 0x10 + t / 5;
            let g = 0x10 + t / 4;
            let b = 0x30 + t / 2;
            let base = 0xFF00_0000 | (r << 16) | (g << 8) | b;
            for x in 0..W {
                // cheap hash sprinkles fixed "stars" into the upper half
                let star = y < H / 2 && (x * 7 + y * 13) % 97 == 0;
                pixels[x + y * W] = if star { 0xFFE0_E0FF } else { base };
            }
        }
        Self::new(W, H, H, pixels).expect("fallback sky atlas is well-formed")
    }
}

const FALLBACK_WALL_COLORS: [(Rgba, Rgba); 8] = [
    (0xFF7A_2020, 0xFF4A_1010), // 1 brick red
    (0xFF20_7A20, 0xFF10_4A10), // 2 green
    (0xFF20_207A, 0xFF10_104A), // 3 blue
    (0xFFB0_B0B0, 0xFF70_7070), // 4 grey
    (0xFFB0_A020, 0xFF70_6010), // 5 gold
    (0xFF7A_207A, 0xFF4A_104A),
    (0xFF20_7A7A, 0xFF10_4A4A),
    (0xFFB0_6020, 0xFF70_3810),
];

/// The four surface-category atlases one session renders with.
#[derive(Clone, Debug)]
pub struct AtlasSet {
    pub wall: TextureAtlas,
    pub floor: TextureAtlas,
    pub ceiling: TextureAtlas,
    pub sky: TextureAtlas,
}

impl AtlasSet {
    /// Procedural set used when the loading collaborator has nothing better.
    pub fn fallback() -> Self {
        Self {
            wall: TextureAtlas::fallback_walls(),
            floor: TextureAtlas::fallback_flat(0xFF5A_4632, 0xFF3C_2E20),
            ceiling: TextureAtlas::fallback_flat(0xFF38_3840, 0xFF24_242C),
            sky: TextureAtlas::fallback_sky(),
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
