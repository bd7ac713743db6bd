//! NES cartridge container and mapper interface.
//!
//! This crate parses iNES / NES 2.0 ROM images and turns them into a
//! [`Cartridge`]: the parsed [`Header`] plus a boxed [`Mapper`] that owns
//! the PRG/CHR data and answers the console's bus accesses.
//!
//! # Supported mappers
//!
//! | Mapper | Name | Description |
//! |--------|------|-------------|
//! | 0 | NROM | No banking; launch-era boards |
//!
//! The mapper interface itself is the product here — banking boards beyond
//! NROM plug in behind [`Mapper`] without touching the console core.
//!
//! # Example
//!
//! ```no_run
//! use famicore_cart::Cartridge;
//!
//! let cart = Cartridge::from_file("game.nes").expect("load failed");
//! let reset_lo = cart.mapper.cpu_read(0xFFFC);
//! println!("mapper {} ({})", cart.mapper.mapper_number(), cart.mapper.mapper_name());
//! ```

pub mod mapper;
pub mod rom;

mod nrom;

pub use mapper::{Mapper, Mirroring};
pub use nrom::Nrom;
pub use rom::{Format, Header, LoadError, Rom};

use std::path::Path;

/// A loaded cartridge: parsed header plus the board that decodes accesses.
pub struct Cartridge {
    /// Parsed container header.
    pub header: Header,
    /// The mapper owning PRG/CHR storage and bank state.
    pub mapper: Box<dyn Mapper>,
}

impl Cartridge {
    /// Load a cartridge from a ROM file on disk.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] on file errors, plus everything
    /// [`Cartridge::from_bytes`] can return.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load a cartridge from an in-memory ROM image.
    ///
    /// # Errors
    ///
    /// Header and section errors from [`Rom::load`], or
    /// [`LoadError::UnknownMapper`] when no board implementation exists
    /// for the header's mapper id.
    pub fn from_bytes(data: &[u8]) -> Result<Self, LoadError> {
        let rom = Rom::load(data)?;
        let mapper = create_mapper(&rom)?;
        log::info!(
            "loaded {} ({}), PRG {} KiB, CHR {} KiB, {:?} mirroring",
            mapper.mapper_name(),
            rom.header.mapper,
            rom.header.prg_rom_size / 1024,
            rom.header.chr_rom_size / 1024,
            rom.header.mirroring,
        );
        Ok(Self {
            header: rom.header,
            mapper,
        })
    }
}

/// Instantiate the board matching the ROM's mapper id.
///
/// # Errors
///
/// [`LoadError::UnknownMapper`] for ids with no implementation.
pub fn create_mapper(rom: &Rom) -> Result<Box<dyn Mapper>, LoadError> {
    match rom.header.mapper {
        0 => Ok(Box::new(Nrom::new(rom))),
        n => Err(LoadError::UnknownMapper(n)),
    }
}

/// Mapper ids this crate can instantiate.
#[must_use]
pub fn supported_mappers() -> &'static [u16] {
    &[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nrom_image() -> Vec<u8> {
        let mut data = Header::MAGIC.to_vec();
        data.extend_from_slice(&[1, 1, 0x01, 0x00]); // 16K PRG, 8K CHR, vertical
        data.extend_from_slice(&[0; 8]);
        data.extend_from_slice(&vec![0xEA; 16384]);
        data.extend_from_slice(&vec![0x00; 8192]);
        data
    }

    #[test]
    fn loads_nrom_cartridge() {
        let cart = Cartridge::from_bytes(&nrom_image()).unwrap();
        assert_eq!(cart.mapper.mapper_number(), 0);
        assert_eq!(cart.mapper.mapper_name(), "NROM");
        assert_eq!(cart.header.mirroring, Mirroring::Vertical);
    }

    #[test]
    fn unknown_mapper_is_an_error() {
        let mut data = nrom_image();
        data[6] |= 0xF0; // mapper low nibble = 15
        assert!(matches!(
            Cartridge::from_bytes(&data),
            Err(LoadError::UnknownMapper(15))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Cartridge::from_file("/nonexistent/game.nes"),
            Err(LoadError::Io(_))
        ));
    }

    #[test]
    fn supported_list_matches_factory() {
        for &id in supported_mappers() {
            let mut data = nrom_image();
            data[6] = (data[6] & 0x0F) | (((id & 0x0F) as u8) << 4);
            assert!(Cartridge::from_bytes(&data).is_ok());
        }
    }
}
