/*!
Keyword tokens of the DBC grammar.

These are part of the compatibility contract with downstream CAN tooling and
must be written byte-for-byte.
*/

pub const VERSION: &str = "VERSION";
pub const NODE: &str = "BU_";
pub const NODE_LIST: &str = "BU_:";
pub const MESSAGE: &str = "BO_";
pub const SIGNAL: &str = "SG_";
pub const MUX_VALUE: &str = "SG_MUL_VAL_";
pub const VALUE: &str = "VAL_";
pub const COMMENT: &str = "CM_";
pub const END: &str = ";";

/// Placeholder used wherever a sender or receiver is not specified.
pub const NO_NODE: &str = "Vector__XXX";

/// The mandatory-but-empty sections between `VERSION` and `BU_:`, including
/// the `BS_` bus-speed placeholder.
pub(crate) const HEADER: &[&str] = &[
    "",
    "NS_ :",
    "\tNS_DESC_",
    "\tCM_",
    "\tBA_DEF_",
    "\tBA_",
    "\tVAL_",
    "\tCAT_DEF_",
    "\tCAT_",
    "\tFILTER",
    "\tBA_DEF_DEF_",
    "\tEV_DATA_",
    "\tENVVAR_DATA_",
    "\tSGTYPE_",
    "\tSGTYPE_VAL_",
    "\tBA_DEF_SGTYPE_",
    "\tBA_SGTYPE_",
    "\tSIG_TYPE_REF_",
    "\tVAL_TABLE_",
    "\tSIG_GROUP_",
    "\tSIG_VALTYPE_",
    "\tSIGTYPE_VALTYPE_",
    "\tBO_TX_BU_",
    "\tBA_DEF_REL_",
    "\tBA_REL_",
    "\tBA_DEF_DEF_REL_",
    "\tBU_SG_REL_",
    "\tBU_EV_REL_",
    "\tBU_BO_REL_",
    "",
    "BS_ :",
    "",
];
