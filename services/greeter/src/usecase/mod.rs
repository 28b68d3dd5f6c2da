pub mod fetch_data;
