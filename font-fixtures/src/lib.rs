//! Synthetic font data shared between the workspace crates' tests.

pub mod build;

/// A valid TrueType sfnt signature and nothing else.
pub static BARE_TRUETYPE_SIGNATURE: &[u8] = &[0x00, 0x01, 0x00, 0x00];

/// Bytes that match no font signature at all.
pub static GARBAGE: &[u8] = &[0xFF; 16];

/// A PFB-wrapped Type 1 font with a full clear-text dictionary.
pub static TYPE1_SAMPLE: &[u8] = b"\x80\x01\x2c\x01\x00\x00\
%!PS-AdobeFont-1.0: TestSans-Regular 001.000\n\
%%CreationDate: 2024-01-01\n\
% comment run before the dictionary\n\
16 dict begin\n\
/FontName /TestSans-Regular def\n\
/PaintType 0 def\n\
/FontType 1 def\n\
/version (001.000) readonly def\n\
/Notice (Copyright 2024 Example) readonly def\n\
/FullName (Test Sans Regular) readonly def\n\
/FamilyName (Test Sans) readonly def\n\
/FSType 8 def\n\
/UniqueID 4038411 def\n\
currentfile eexec\n\
\x01\x02\x03\x04";

/// A PFB-wrapped Type 1 font that declares no `/FSType`.
pub static TYPE1_NO_FSTYPE: &[u8] = b"\x80\x01\x40\x00\x00\x00\
%!PS-AdobeFont-1.0: Plain 001.000\n\
/FontName /Plain def\n\
/FamilyName (Plain) readonly def\n\
currentfile eexec\n";
