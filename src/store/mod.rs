//! Record stores en memoria
//!
//! Este módulo contiene los almacenes de registros del sistema. La capa
//! de persistencia es un store genérico (find/update/delete) protegido
//! por `RwLock`, sin transacciones entre vehículos.

pub mod technical_details_store;
pub mod user_store;
pub mod vehicle_store;
