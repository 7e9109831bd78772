//! Static crop and region catalogs offered during registration and onboarding.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Indian cropping season a crop is grown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Monsoon crop, sown June, harvested by October.
    Kharif,
    /// Winter crop, sown November, harvested by April.
    Rabi,
    /// Occupies the field for a full year.
    Annual,
    /// Stays productive for several years.
    Perennial,
}

impl Season {
    /// Short description of the growing window.
    #[must_use]
    pub const fn window(self) -> &'static str {
        match self {
            Self::Kharif => "Jun-Oct",
            Self::Rabi => "Nov-Apr",
            Self::Annual => "Year-round",
            Self::Perennial => "Multi-year",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kharif => "Kharif",
            Self::Rabi => "Rabi",
            Self::Annual => "Annual",
            Self::Perennial => "Perennial",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A crop the user can pick during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crop {
    pub name: &'static str,
    pub season: Season,
}

const fn crop(name: &'static str, season: Season) -> Crop {
    Crop { name, season }
}

/// Crops offered on the crop selection page, in display order.
pub const CROPS: &[Crop] = &[
    crop("Rice", Season::Kharif),
    crop("Wheat", Season::Rabi),
    crop("Jowar", Season::Kharif),
    crop("Soybean", Season::Kharif),
    crop("Cotton", Season::Kharif),
    crop("Groundnut", Season::Kharif),
    crop("Tur", Season::Kharif),
    crop("Moong", Season::Kharif),
    crop("Chana", Season::Rabi),
    crop("Sugarcane", Season::Annual),
    crop("Onion", Season::Rabi),
    crop("Tomato", Season::Rabi),
    crop("Grapes", Season::Perennial),
    crop("Bajra", Season::Kharif),
    crop("Maize", Season::Kharif),
];

/// A state with its selectable districts and registration cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub state: &'static str,
    /// Districts offered by the region selection step.
    pub districts: &'static [&'static str],
    /// Cities offered by the registration form.
    pub cities: &'static [&'static str],
}

/// Supported states.
pub const REGIONS: &[Region] = &[
    Region {
        state: "Maharashtra",
        districts: &[
            "Pune", "Mumbai", "Nagpur", "Nashik", "Solapur", "Kolhapur", "Sangli", "Satara",
            "Jalgaon",
        ],
        cities: &[
            "Ahmednagar",
            "Akola",
            "Amravati",
            "Aurangabad",
            "Beed",
            "Bhandara",
            "Buldhana",
            "Chandrapur",
            "Dhule",
            "Gadchiroli",
            "Gondia",
            "Hingoli",
            "Jalgaon",
            "Jalna",
            "Kolhapur",
            "Latur",
            "Mumbai City",
            "Mumbai Suburban",
            "Nagpur",
            "Nanded",
            "Nandurbar",
            "Nashik",
            "Osmanabad",
            "Palghar",
            "Parbhani",
            "Pune",
            "Raigad",
            "Ratnagiri",
            "Sangli",
            "Satara",
            "Sindhudurg",
            "Solapur",
            "Thane",
            "Wardha",
            "Washim",
            "Yavatmal",
        ],
    },
    Region {
        state: "Punjab",
        districts: &["Amritsar", "Ludhiana", "Patiala", "Jalandhar", "Bathinda"],
        cities: &[
            "Amritsar",
            "Barnala",
            "Bathinda",
            "Faridkot",
            "Fatehgarh Sahib",
            "Firozpur",
            "Gurdaspur",
            "Hoshiarpur",
            "Jalandhar",
            "Kapurthala",
            "Ludhiana",
            "Mansa",
            "Moga",
            "Muktsar",
            "Patiala",
            "Rupnagar",
            "Sangrur",
            "Tarn Taran",
        ],
    },
];

/// Look up a region by exact state name.
#[must_use]
pub fn region(state: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.state == state)
}

/// Districts of `state`, or an empty slice for an unknown state.
#[must_use]
pub fn districts_of(state: &str) -> &'static [&'static str] {
    region(state).map_or(&[], |r| r.districts)
}

/// Registration cities of `state`, or an empty slice for an unknown state.
#[must_use]
pub fn cities_of(state: &str) -> &'static [&'static str] {
    region(state).map_or(&[], |r| r.cities)
}

/// Find the crop with the given name.
#[must_use]
pub fn find_crop(name: &str) -> Option<&'static Crop> {
    CROPS.iter().find(|c| c.name == name)
}
