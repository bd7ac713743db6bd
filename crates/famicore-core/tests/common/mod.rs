//! Shared helpers: synthesized NROM images for driving the console.

#![allow(dead_code)] // not every test file uses every helper

/// Build a 32 KiB NROM-256 image with `program` placed at `origin` and the
/// reset vector pointing there. The rest of PRG is NOP sleds; CHR is zero.
#[must_use]
pub fn nrom_image(program: &[u8], origin: u16) -> Vec<u8> {
    nrom_image_with_nmi(program, origin, &[], 0)
}

/// As [`nrom_image`], additionally placing an NMI handler and vector.
/// Pass an empty handler to leave the NMI vector at the reset target.
#[must_use]
pub fn nrom_image_with_nmi(
    program: &[u8],
    origin: u16,
    nmi_handler: &[u8],
    nmi_origin: u16,
) -> Vec<u8> {
    assert!(origin >= 0x8000);
    let mut prg = vec![0xEA; 32768];

    let start = (origin - 0x8000) as usize;
    prg[start..start + program.len()].copy_from_slice(program);

    let nmi_target = if nmi_handler.is_empty() {
        origin
    } else {
        let nmi_start = (nmi_origin - 0x8000) as usize;
        prg[nmi_start..nmi_start + nmi_handler.len()].copy_from_slice(nmi_handler);
        nmi_origin
    };

    prg[0x7FFA] = (nmi_target & 0xFF) as u8;
    prg[0x7FFB] = (nmi_target >> 8) as u8;
    prg[0x7FFC] = (origin & 0xFF) as u8;
    prg[0x7FFD] = (origin >> 8) as u8;

    let mut image = vec![0x4E, 0x45, 0x53, 0x1A, 2, 1, 0x01, 0x00];
    image.extend_from_slice(&[0; 8]);
    image.extend_from_slice(&prg);
    image.extend_from_slice(&[0; 8192]);
    image
}
