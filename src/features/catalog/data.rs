//! Built-in reference data: cities, services and stock image pools.

use std::collections::BTreeMap;

use crate::features::catalog::models::{CatalogData, City, Region, Service};

/// (slug, arabic name, latin name, region)
const CITIES: &[(&str, &str, &str, Region)] = &[
    ("riyadh", "الرياض", "Riyadh", Region::Central),
    ("al-kharj", "الخرج", "Al Kharj", Region::Central),
    ("buraidah", "بريدة", "Buraidah", Region::Central),
    ("unaizah", "عنيزة", "Unaizah", Region::Central),
    ("jeddah", "جدة", "Jeddah", Region::Western),
    ("mecca", "مكة المكرمة", "Makkah", Region::Western),
    ("medina", "المدينة المنورة", "Madinah", Region::Western),
    ("taif", "الطائف", "Taif", Region::Western),
    ("yanbu", "ينبع", "Yanbu", Region::Western),
    ("rabigh", "رابغ", "Rabigh", Region::Western),
    ("dammam", "الدمام", "Dammam", Region::Eastern),
    ("khobar", "الخبر", "Al Khobar", Region::Eastern),
    ("dhahran", "الظهران", "Dhahran", Region::Eastern),
    ("jubail", "الجبيل", "Jubail", Region::Eastern),
    ("al-ahsa", "الأحساء", "Al Ahsa", Region::Eastern),
    ("qatif", "القطيف", "Qatif", Region::Eastern),
    ("hafar-al-batin", "حفر الباطن", "Hafar Al Batin", Region::Eastern),
    ("tabuk", "تبوك", "Tabuk", Region::Northern),
    ("hail", "حائل", "Hail", Region::Northern),
    ("sakaka", "سكاكا", "Sakaka", Region::Northern),
    ("arar", "عرعر", "Arar", Region::Northern),
    ("abha", "أبها", "Abha", Region::Southern),
    ("khamis-mushait", "خميس مشيط", "Khamis Mushait", Region::Southern),
    ("jazan", "جازان", "Jazan", Region::Southern),
    ("najran", "نجران", "Najran", Region::Southern),
    ("al-baha", "الباحة", "Al Baha", Region::Southern),
];

/// (slug, arabic name, latin name, category)
const SERVICES: &[(&str, &str, &str, &str)] = &[
    ("furniture-moving", "نقل عفش", "Furniture Moving", "moving"),
    ("furniture-storage", "تخزين عفش", "Furniture Storage", "moving"),
    ("furniture-assembly", "تركيب أثاث", "Furniture Assembly", "moving"),
    ("house-cleaning", "تنظيف منازل", "House Cleaning", "cleaning"),
    ("sofa-cleaning", "تنظيف كنب", "Sofa Cleaning", "cleaning"),
    ("carpet-cleaning", "تنظيف سجاد", "Carpet Cleaning", "cleaning"),
    ("tank-cleaning", "تنظيف خزانات", "Water Tank Cleaning", "cleaning"),
    ("pest-control", "مكافحة حشرات", "Pest Control", "pest-control"),
    ("termite-control", "مكافحة النمل الأبيض", "Termite Control", "pest-control"),
    ("ac-maintenance", "صيانة مكيفات", "AC Maintenance", "maintenance"),
    ("plumbing", "سباكة", "Plumbing", "maintenance"),
    ("electrical", "كهربائي", "Electrical Works", "maintenance"),
    ("water-leak-detection", "كشف تسربات المياه", "Water Leak Detection", "maintenance"),
    ("drain-unclogging", "تسليك مجاري", "Drain Unclogging", "maintenance"),
    ("roof-insulation", "عزل أسطح", "Roof Insulation", "insulation"),
    ("tank-insulation", "عزل خزانات", "Tank Insulation", "insulation"),
    ("painting", "دهانات", "Painting", "finishing"),
    ("gypsum-works", "أعمال جبس", "Gypsum Works", "finishing"),
    ("parquet-installation", "تركيب باركيه", "Parquet Installation", "finishing"),
];

/// (category, number of stock images)
const IMAGE_POOLS: &[(&str, usize)] = &[
    ("moving", 14),
    ("cleaning", 12),
    ("pest-control", 8),
    ("maintenance", 12),
    ("insulation", 6),
    ("finishing", 9),
];

fn image_path(category: &str, index: usize) -> String {
    format!("/images/services/{0}/{0}-{1:02}.webp", category, index)
}

pub fn builtin_data() -> CatalogData {
    let cities = CITIES
        .iter()
        .map(|&(slug, name_local, name_alt, region)| City {
            slug: slug.to_string(),
            name_local: name_local.to_string(),
            name_alt: name_alt.to_string(),
            region,
        })
        .collect();

    let services = SERVICES
        .iter()
        .map(|&(slug, name_local, name_alt, category)| Service {
            slug: slug.to_string(),
            name_local: name_local.to_string(),
            name_alt: name_alt.to_string(),
            category: category.to_string(),
        })
        .collect();

    let image_pools: BTreeMap<String, Vec<String>> = IMAGE_POOLS
        .iter()
        .map(|&(category, count)| {
            let paths = (1..=count).map(|i| image_path(category, i)).collect();
            (category.to_string(), paths)
        })
        .collect();

    CatalogData {
        cities,
        services,
        image_pools,
    }
}
