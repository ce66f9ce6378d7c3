pub mod sitemap_handler;
