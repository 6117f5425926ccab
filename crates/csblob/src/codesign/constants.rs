//! Apple code signing constants and typed views over them
//!
//! These constants define the binary format for Apple code signatures,
//! including SuperBlob magics, slot types, hash types, and flag bits.
//! The enum and bitmask types at the bottom map raw wire integers to named
//! variants while always retaining the raw value for unrecognized input.

// =============================================================================
// Blob Magic Numbers
// =============================================================================

/// SuperBlob containing all signature components (embedded signature)
pub const CSMAGIC_EMBEDDED_SIGNATURE: u32 = 0xfade0cc0;

/// Old embedded signature form
pub const CSMAGIC_EMBEDDED_SIGNATURE_OLD: u32 = 0xfade0b02;

/// CodeDirectory blob magic
pub const CSMAGIC_CODEDIRECTORY: u32 = 0xfade0c02;

/// Requirements vector blob magic
pub const CSMAGIC_REQUIREMENTS: u32 = 0xfade0c01;

/// Single requirement blob magic
pub const CSMAGIC_REQUIREMENT: u32 = 0xfade0c00;

/// Embedded entitlements (XML plist format)
pub const CSMAGIC_EMBEDDED_ENTITLEMENTS: u32 = 0xfade7171;

/// Embedded DER entitlements (ASN.1 DER format)
pub const CSMAGIC_EMBEDDED_DER_ENTITLEMENTS: u32 = 0xfade7172;

/// CMS signature wrapper blob
pub const CSMAGIC_BLOBWRAPPER: u32 = 0xfade0b01;

/// Multi-arch collection of embedded signatures
pub const CSMAGIC_DETACHED_SIGNATURE: u32 = 0xfade0cc1;

// =============================================================================
// Slot Types (for SuperBlob index)
// =============================================================================

/// Main code directory slot
pub const CSSLOT_CODEDIRECTORY: u32 = 0x0000;

/// Info.plist slot
pub const CSSLOT_INFOSLOT: u32 = 0x0001;

/// Code requirements slot
pub const CSSLOT_REQUIREMENTS: u32 = 0x0002;

/// Resource directory (CodeResources) slot
pub const CSSLOT_RESOURCEDIR: u32 = 0x0003;

/// Application-specific slot
pub const CSSLOT_APPLICATION: u32 = 0x0004;

/// Entitlements slot (XML format)
pub const CSSLOT_ENTITLEMENTS: u32 = 0x0005;

/// Rep-specific slot
pub const CSSLOT_REP_SPECIFIC: u32 = 0x0006;

/// DER entitlements slot
pub const CSSLOT_DER_ENTITLEMENTS: u32 = 0x0007;

/// Alternate code directories start (SHA-256, SHA-384, etc.)
pub const CSSLOT_ALTERNATE_CODEDIRECTORIES: u32 = 0x1000;

/// Maximum number of alternate code directories
pub const CSSLOT_ALTERNATE_CODEDIRECTORY_MAX: u32 = 5;

/// Limit for alternate code directory slots (one past the last)
pub const CSSLOT_ALTERNATE_CODEDIRECTORY_LIMIT: u32 =
    CSSLOT_ALTERNATE_CODEDIRECTORIES + CSSLOT_ALTERNATE_CODEDIRECTORY_MAX;

/// CMS signature slot
pub const CSSLOT_SIGNATURESLOT: u32 = 0x10000;

/// Identification slot
pub const CSSLOT_IDENTIFICATIONSLOT: u32 = 0x10001;

/// Ticket/notarization slot
pub const CSSLOT_TICKETSLOT: u32 = 0x10002;

// =============================================================================
// Hash Types
// =============================================================================

/// No hash (placeholder)
pub const CS_HASHTYPE_NOHASH: u8 = 0;

/// SHA-1 hash (160-bit / 20 bytes)
pub const CS_HASHTYPE_SHA1: u8 = 1;

/// SHA-256 hash (256-bit / 32 bytes)
pub const CS_HASHTYPE_SHA256: u8 = 2;

/// SHA-256 truncated to 20 bytes (legacy compatibility)
pub const CS_HASHTYPE_SHA256_TRUNCATED: u8 = 3;

/// SHA-384 hash (384-bit / 48 bytes)
pub const CS_HASHTYPE_SHA384: u8 = 4;

/// SHA-512 hash (512-bit / 64 bytes)
pub const CS_HASHTYPE_SHA512: u8 = 5;

// =============================================================================
// Hash Sizes
// =============================================================================

/// SHA-1 hash size in bytes
pub const CS_SHA1_LEN: u8 = 20;

/// SHA-256 hash size in bytes
pub const CS_SHA256_LEN: u8 = 32;

/// SHA-384 hash size in bytes
pub const CS_SHA384_LEN: u8 = 48;

/// SHA-512 hash size in bytes
pub const CS_SHA512_LEN: u8 = 64;

// =============================================================================
// Code Signature Flags
// =============================================================================

/// Dynamically valid
pub const CS_VALID: u32 = 0x00000001;

/// Ad-hoc signed (no identity)
pub const CS_ADHOC: u32 = 0x00000002;

/// Has get-task-allow entitlement
pub const CS_GET_TASK_ALLOW: u32 = 0x00000004;

/// Has installer entitlement
pub const CS_INSTALLER: u32 = 0x00000008;

/// Library validation required by hardened system policy
pub const CS_FORCED_LV: u32 = 0x00000010;

/// Page invalidation allowed by task port policy (macOS only)
pub const CS_INVALID_ALLOWED: u32 = 0x00000020;

/// Don't load invalid pages
pub const CS_HARD: u32 = 0x00000100;

/// Kill process if it becomes invalid
pub const CS_KILL: u32 = 0x00000200;

/// Force expiration checking
pub const CS_CHECK_EXPIRATION: u32 = 0x00000400;

/// Tell dyld to treat as restricted
pub const CS_RESTRICT: u32 = 0x00000800;

/// Require enforcement
pub const CS_ENFORCEMENT: u32 = 0x00001000;

/// Require library validation
pub const CS_REQUIRE_LV: u32 = 0x00002000;

/// Code signature permits restricted entitlements
pub const CS_ENTITLEMENTS_VALIDATED: u32 = 0x00004000;

/// Has heritable NVRAM-variable entitlement
pub const CS_NVRAM_UNRESTRICTED: u32 = 0x00008000;

/// Apply hardened runtime policies
pub const CS_RUNTIME: u32 = 0x00010000;

/// Automatically signed by the linker
pub const CS_LINKER_SIGNED: u32 = 0x00020000;

// =============================================================================
// Exec Segment Flags
// =============================================================================

/// Executable segment denotes main binary
pub const CS_EXECSEG_MAIN_BINARY: u64 = 0x0001;

/// Allow unsigned pages (for debugging)
pub const CS_EXECSEG_ALLOW_UNSIGNED: u64 = 0x0010;

/// Main binary is debugger
pub const CS_EXECSEG_DEBUGGER: u64 = 0x0020;

/// JIT enabled
pub const CS_EXECSEG_JIT: u64 = 0x0040;

/// OBSOLETE: skip library validation
pub const CS_EXECSEG_SKIP_LV: u64 = 0x0080;

/// Can bless cdhash for execution
pub const CS_EXECSEG_CAN_LOAD_CDHASH: u64 = 0x0100;

/// Can execute blessed cdhash
pub const CS_EXECSEG_CAN_EXEC_CDHASH: u64 = 0x0200;

// =============================================================================
// CodeDirectory Versions
// =============================================================================

/// Earliest CodeDirectory version
pub const CODEDIRECTORY_VERSION_EARLIEST: u32 = 0x20001;

/// Version with scatter support
pub const CODEDIRECTORY_VERSION_SCATTER: u32 = 0x20100;

/// Version with team ID support
pub const CODEDIRECTORY_VERSION_TEAMID: u32 = 0x20200;

/// Version with 64-bit code limit support
pub const CODEDIRECTORY_VERSION_CODELIMIT64: u32 = 0x20300;

/// Version with exec segment support
pub const CODEDIRECTORY_VERSION_EXECSEG: u32 = 0x20400;

/// Version with runtime and pre-encryption offset
pub const CODEDIRECTORY_VERSION_RUNTIME: u32 = 0x20500;

/// Version with linkage hashes
pub const CODEDIRECTORY_VERSION_LINKAGE: u32 = 0x20600;

// =============================================================================
// Requirements Types
// =============================================================================

/// Requirement type: host requirement
pub const CSREQ_HOST: u32 = 0x0001;

/// Requirement type: guest requirement
pub const CSREQ_GUEST: u32 = 0x0002;

/// Requirement type: designated requirement
pub const CSREQ_DESIGNATED: u32 = 0x0003;

/// Requirement type: library requirement
pub const CSREQ_LIBRARY: u32 = 0x0004;

/// Requirement type: plugin requirement
pub const CSREQ_PLUGIN: u32 = 0x0005;

// =============================================================================
// Typed Views
// =============================================================================

/// A blob magic value, decoded to a named variant where recognized.
///
/// Unrecognized magics are never an error; they are carried as
/// [`CsMagic::Unknown`] with the raw value intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsMagic {
    /// Single requirement
    Requirement,
    /// Requirements vector
    Requirements,
    /// CodeDirectory
    CodeDirectory,
    /// Embedded signature SuperBlob
    EmbeddedSignature,
    /// Old embedded signature form
    EmbeddedSignatureOld,
    /// Detached multi-arch signature
    DetachedSignature,
    /// CMS signature wrapper
    BlobWrapper,
    /// XML entitlements
    EmbeddedEntitlements,
    /// DER entitlements
    EmbeddedDerEntitlements,
    /// Not a magic this decoder knows about
    Unknown(u32),
}

impl CsMagic {
    /// Map a raw wire value to a variant.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            CSMAGIC_REQUIREMENT => Self::Requirement,
            CSMAGIC_REQUIREMENTS => Self::Requirements,
            CSMAGIC_CODEDIRECTORY => Self::CodeDirectory,
            CSMAGIC_EMBEDDED_SIGNATURE => Self::EmbeddedSignature,
            CSMAGIC_EMBEDDED_SIGNATURE_OLD => Self::EmbeddedSignatureOld,
            CSMAGIC_DETACHED_SIGNATURE => Self::DetachedSignature,
            CSMAGIC_BLOBWRAPPER => Self::BlobWrapper,
            CSMAGIC_EMBEDDED_ENTITLEMENTS => Self::EmbeddedEntitlements,
            CSMAGIC_EMBEDDED_DER_ENTITLEMENTS => Self::EmbeddedDerEntitlements,
            other => Self::Unknown(other),
        }
    }

    /// The raw wire value.
    pub fn raw(self) -> u32 {
        match self {
            Self::Requirement => CSMAGIC_REQUIREMENT,
            Self::Requirements => CSMAGIC_REQUIREMENTS,
            Self::CodeDirectory => CSMAGIC_CODEDIRECTORY,
            Self::EmbeddedSignature => CSMAGIC_EMBEDDED_SIGNATURE,
            Self::EmbeddedSignatureOld => CSMAGIC_EMBEDDED_SIGNATURE_OLD,
            Self::DetachedSignature => CSMAGIC_DETACHED_SIGNATURE,
            Self::BlobWrapper => CSMAGIC_BLOBWRAPPER,
            Self::EmbeddedEntitlements => CSMAGIC_EMBEDDED_ENTITLEMENTS,
            Self::EmbeddedDerEntitlements => CSMAGIC_EMBEDDED_DER_ENTITLEMENTS,
            Self::Unknown(raw) => raw,
        }
    }

    /// Name for rendering, or `None` for unrecognized magics.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::Requirement => Some("CSMAGIC_REQUIREMENT"),
            Self::Requirements => Some("CSMAGIC_REQUIREMENTS"),
            Self::CodeDirectory => Some("CSMAGIC_CODEDIRECTORY"),
            Self::EmbeddedSignature => Some("CSMAGIC_EMBEDDED_SIGNATURE"),
            Self::EmbeddedSignatureOld => Some("CSMAGIC_EMBEDDED_SIGNATURE_OLD"),
            Self::DetachedSignature => Some("CSMAGIC_DETACHED_SIGNATURE"),
            Self::BlobWrapper => Some("CSMAGIC_BLOBWRAPPER"),
            Self::EmbeddedEntitlements => Some("CSMAGIC_EMBEDDED_ENTITLEMENTS"),
            Self::EmbeddedDerEntitlements => Some("CSMAGIC_EMBEDDED_DER_ENTITLEMENTS"),
            Self::Unknown(_) => None,
        }
    }
}

/// The role a blob plays within the SuperBlob index.
///
/// Only [`SlotType::CodeDirectory`], [`SlotType::Requirements`], and
/// [`SlotType::Signature`] have dedicated decoders; every other slot falls
/// back to raw-byte capture so an extensible index never aborts the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotType {
    /// Main code directory (0x0)
    CodeDirectory,
    /// Info.plist (0x1)
    Info,
    /// Code requirements (0x2)
    Requirements,
    /// Resource directory (0x3)
    ResourceDir,
    /// Application-specific (0x4)
    Application,
    /// XML entitlements (0x5)
    Entitlements,
    /// Rep-specific (0x6)
    RepSpecific,
    /// DER entitlements (0x7)
    DerEntitlements,
    /// Alternate code directory `n`, for slots 0x1000..0x1005
    AlternateCodeDirectory(u32),
    /// CMS signature (0x10000)
    Signature,
    /// Identification (0x10001)
    Identification,
    /// Notarization ticket (0x10002)
    Ticket,
    /// Not a slot this decoder knows about
    Unknown(u32),
}

impl SlotType {
    /// Map a raw slot tag to a variant.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            CSSLOT_CODEDIRECTORY => Self::CodeDirectory,
            CSSLOT_INFOSLOT => Self::Info,
            CSSLOT_REQUIREMENTS => Self::Requirements,
            CSSLOT_RESOURCEDIR => Self::ResourceDir,
            CSSLOT_APPLICATION => Self::Application,
            CSSLOT_ENTITLEMENTS => Self::Entitlements,
            CSSLOT_REP_SPECIFIC => Self::RepSpecific,
            CSSLOT_DER_ENTITLEMENTS => Self::DerEntitlements,
            CSSLOT_ALTERNATE_CODEDIRECTORIES..=0x1004 => {
                Self::AlternateCodeDirectory(raw - CSSLOT_ALTERNATE_CODEDIRECTORIES)
            }
            CSSLOT_SIGNATURESLOT => Self::Signature,
            CSSLOT_IDENTIFICATIONSLOT => Self::Identification,
            CSSLOT_TICKETSLOT => Self::Ticket,
            other => Self::Unknown(other),
        }
    }

    /// The raw wire value.
    pub fn raw(self) -> u32 {
        match self {
            Self::CodeDirectory => CSSLOT_CODEDIRECTORY,
            Self::Info => CSSLOT_INFOSLOT,
            Self::Requirements => CSSLOT_REQUIREMENTS,
            Self::ResourceDir => CSSLOT_RESOURCEDIR,
            Self::Application => CSSLOT_APPLICATION,
            Self::Entitlements => CSSLOT_ENTITLEMENTS,
            Self::RepSpecific => CSSLOT_REP_SPECIFIC,
            Self::DerEntitlements => CSSLOT_DER_ENTITLEMENTS,
            Self::AlternateCodeDirectory(n) => CSSLOT_ALTERNATE_CODEDIRECTORIES + n,
            Self::Signature => CSSLOT_SIGNATURESLOT,
            Self::Identification => CSSLOT_IDENTIFICATIONSLOT,
            Self::Ticket => CSSLOT_TICKETSLOT,
            Self::Unknown(raw) => raw,
        }
    }
}

/// Hash algorithm identifier from a CodeDirectory header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    /// No hash (placeholder)
    None,
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-256 truncated to 20 bytes
    Sha256Truncated,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// Not a hash type this decoder knows about
    Unknown(u8),
}

impl HashType {
    /// Map a raw hash type code to a variant.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            CS_HASHTYPE_NOHASH => Self::None,
            CS_HASHTYPE_SHA1 => Self::Sha1,
            CS_HASHTYPE_SHA256 => Self::Sha256,
            CS_HASHTYPE_SHA256_TRUNCATED => Self::Sha256Truncated,
            CS_HASHTYPE_SHA384 => Self::Sha384,
            CS_HASHTYPE_SHA512 => Self::Sha512,
            other => Self::Unknown(other),
        }
    }

    /// The raw wire value.
    pub fn raw(self) -> u8 {
        match self {
            Self::None => CS_HASHTYPE_NOHASH,
            Self::Sha1 => CS_HASHTYPE_SHA1,
            Self::Sha256 => CS_HASHTYPE_SHA256,
            Self::Sha256Truncated => CS_HASHTYPE_SHA256_TRUNCATED,
            Self::Sha384 => CS_HASHTYPE_SHA384,
            Self::Sha512 => CS_HASHTYPE_SHA512,
            Self::Unknown(raw) => raw,
        }
    }
}

/// Requirement type from a requirements blob index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementType {
    /// Host requirement
    Host,
    /// Guest requirement
    Guest,
    /// Designated requirement
    Designated,
    /// Library requirement
    Library,
    /// Plugin requirement
    Plugin,
    /// Not a requirement type this decoder knows about
    Unknown(u32),
}

impl RequirementType {
    /// Map a raw requirement type to a variant.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            CSREQ_HOST => Self::Host,
            CSREQ_GUEST => Self::Guest,
            CSREQ_DESIGNATED => Self::Designated,
            CSREQ_LIBRARY => Self::Library,
            CSREQ_PLUGIN => Self::Plugin,
            other => Self::Unknown(other),
        }
    }

    /// The raw wire value.
    pub fn raw(self) -> u32 {
        match self {
            Self::Host => CSREQ_HOST,
            Self::Guest => CSREQ_GUEST,
            Self::Designated => CSREQ_DESIGNATED,
            Self::Library => CSREQ_LIBRARY,
            Self::Plugin => CSREQ_PLUGIN,
            Self::Unknown(raw) => raw,
        }
    }
}

const CS_FLAG_NAMES: &[(u32, &str)] = &[
    (CS_VALID, "CS_VALID"),
    (CS_ADHOC, "CS_ADHOC"),
    (CS_GET_TASK_ALLOW, "CS_GET_TASK_ALLOW"),
    (CS_INSTALLER, "CS_INSTALLER"),
    (CS_FORCED_LV, "CS_FORCED_LV"),
    (CS_INVALID_ALLOWED, "CS_INVALID_ALLOWED"),
    (CS_HARD, "CS_HARD"),
    (CS_KILL, "CS_KILL"),
    (CS_CHECK_EXPIRATION, "CS_CHECK_EXPIRATION"),
    (CS_RESTRICT, "CS_RESTRICT"),
    (CS_ENFORCEMENT, "CS_ENFORCEMENT"),
    (CS_REQUIRE_LV, "CS_REQUIRE_LV"),
    (CS_ENTITLEMENTS_VALIDATED, "CS_ENTITLEMENTS_VALIDATED"),
    (CS_NVRAM_UNRESTRICTED, "CS_NVRAM_UNRESTRICTED"),
    (CS_RUNTIME, "CS_RUNTIME"),
    (CS_LINKER_SIGNED, "CS_LINKER_SIGNED"),
];

/// Code signature flags from a CodeDirectory header.
///
/// A bitmask view: known bits can be tested and named, and the full raw value
/// is kept so yet-unknown bits survive decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CsFlags(u32);

impl CsFlags {
    /// Wrap a raw flags word.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The full raw value, unknown bits included.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether all bits of `flag` are set.
    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }

    /// Names of the known flags that are set, in bit order.
    pub fn set_names(self) -> Vec<&'static str> {
        CS_FLAG_NAMES
            .iter()
            .filter(|(bit, _)| self.0 & bit != 0)
            .map(|&(_, name)| name)
            .collect()
    }

    /// Bits set that this decoder has no name for.
    pub fn unknown_bits(self) -> u32 {
        let known = CS_FLAG_NAMES.iter().fold(0, |acc, &(bit, _)| acc | bit);
        self.0 & !known
    }
}

const CS_EXECSEG_FLAG_NAMES: &[(u64, &str)] = &[
    (CS_EXECSEG_MAIN_BINARY, "CS_EXECSEG_MAIN_BINARY"),
    (CS_EXECSEG_ALLOW_UNSIGNED, "CS_EXECSEG_ALLOW_UNSIGNED"),
    (CS_EXECSEG_DEBUGGER, "CS_EXECSEG_DEBUGGER"),
    (CS_EXECSEG_JIT, "CS_EXECSEG_JIT"),
    (CS_EXECSEG_SKIP_LV, "CS_EXECSEG_SKIP_LV"),
    (CS_EXECSEG_CAN_LOAD_CDHASH, "CS_EXECSEG_CAN_LOAD_CDHASH"),
    (CS_EXECSEG_CAN_EXEC_CDHASH, "CS_EXECSEG_CAN_EXEC_CDHASH"),
];

/// Executable segment flags from a version 0x20400+ CodeDirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecSegFlags(u64);

impl ExecSegFlags {
    /// Wrap a raw flags word.
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// The full raw value, unknown bits included.
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Whether all bits of `flag` are set.
    pub fn contains(self, flag: u64) -> bool {
        self.0 & flag == flag
    }

    /// Names of the known flags that are set, in bit order.
    pub fn set_names(self) -> Vec<&'static str> {
        CS_EXECSEG_FLAG_NAMES
            .iter()
            .filter(|(bit, _)| self.0 & bit != 0)
            .map(|&(_, name)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_numbers() {
        // Verify magic numbers match Apple's specifications
        assert_eq!(CSMAGIC_EMBEDDED_SIGNATURE, 0xfade0cc0);
        assert_eq!(CSMAGIC_CODEDIRECTORY, 0xfade0c02);
        assert_eq!(CSMAGIC_REQUIREMENTS, 0xfade0c01);
        assert_eq!(CSMAGIC_EMBEDDED_ENTITLEMENTS, 0xfade7171);
        assert_eq!(CSMAGIC_BLOBWRAPPER, 0xfade0b01);
    }

    #[test]
    fn test_slot_types() {
        assert_eq!(CSSLOT_CODEDIRECTORY, 0x0000);
        assert_eq!(CSSLOT_REQUIREMENTS, 0x0002);
        assert_eq!(CSSLOT_ENTITLEMENTS, 0x0005);
        assert_eq!(CSSLOT_ALTERNATE_CODEDIRECTORIES, 0x1000);
        assert_eq!(CSSLOT_SIGNATURESLOT, 0x10000);
        assert_eq!(CSSLOT_TICKETSLOT, 0x10002);
    }

    #[test]
    fn test_magic_round_trip() {
        for raw in [
            CSMAGIC_REQUIREMENT,
            CSMAGIC_REQUIREMENTS,
            CSMAGIC_CODEDIRECTORY,
            CSMAGIC_EMBEDDED_SIGNATURE,
            CSMAGIC_BLOBWRAPPER,
            0xdeadbeef,
        ] {
            assert_eq!(CsMagic::from_raw(raw).raw(), raw);
        }
        assert_eq!(CsMagic::from_raw(0xdeadbeef), CsMagic::Unknown(0xdeadbeef));
        assert_eq!(CsMagic::from_raw(0xdeadbeef).name(), None);
    }

    #[test]
    fn test_slot_type_alternate_range() {
        assert_eq!(
            SlotType::from_raw(0x1000),
            SlotType::AlternateCodeDirectory(0)
        );
        assert_eq!(
            SlotType::from_raw(0x1004),
            SlotType::AlternateCodeDirectory(4)
        );
        // One past the last alternate slot is unknown
        assert_eq!(
            SlotType::from_raw(CSSLOT_ALTERNATE_CODEDIRECTORY_LIMIT),
            SlotType::Unknown(0x1005)
        );
        assert_eq!(SlotType::from_raw(0x1003).raw(), 0x1003);
    }

    #[test]
    fn test_flags_preserve_unknown_bits() {
        let flags = CsFlags::from_bits(CS_ADHOC | CS_RUNTIME | 0x80000000);
        assert!(flags.contains(CS_ADHOC));
        assert!(flags.contains(CS_RUNTIME));
        assert!(!flags.contains(CS_HARD));
        assert_eq!(flags.bits(), CS_ADHOC | CS_RUNTIME | 0x80000000);
        assert_eq!(flags.unknown_bits(), 0x80000000);
        assert_eq!(flags.set_names(), vec!["CS_ADHOC", "CS_RUNTIME"]);
    }

    #[test]
    fn test_execseg_flag_names() {
        let flags = ExecSegFlags::from_bits(CS_EXECSEG_MAIN_BINARY | CS_EXECSEG_JIT);
        assert_eq!(
            flags.set_names(),
            vec!["CS_EXECSEG_MAIN_BINARY", "CS_EXECSEG_JIT"]
        );
    }

    #[test]
    fn test_hash_type_unknown() {
        assert_eq!(HashType::from_raw(2), HashType::Sha256);
        assert_eq!(HashType::from_raw(99), HashType::Unknown(99));
        assert_eq!(HashType::from_raw(99).raw(), 99);
    }
}
