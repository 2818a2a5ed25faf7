pub mod db;
pub mod product {
    pub mod entity;
    pub mod gateway;
    pub mod in_memory;
}
