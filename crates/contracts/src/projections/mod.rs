pub mod p900_catalog_table;
