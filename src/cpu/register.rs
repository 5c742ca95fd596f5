/// Identifies one of the CPU's general-purpose or bookkeeping registers, used so the
/// executor can share a single read/write/modify path across `TAX`-style transfer
/// instructions instead of duplicating it per register.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Register {
    A,
    X,
    Y,
    Sp,
    P,
}
