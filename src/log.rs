pub mod targets {
    pub const NORMAL_FORM: &str = "normal form";
    pub const FLATTEN: &str = "flatten";
    pub const DPLL: &str = "dpll";
    pub const WALKSAT: &str = "walksat";
    pub const RESOLUTION: &str = "resolution";
    pub const SOLVER: &str = "solver";
}
