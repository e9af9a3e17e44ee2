//! Delivery board hierarchy (regional -> local -> sub-local)
//!
//! Static lookup used by the checkout form. Orders store the selected names
//! as plain strings; the hierarchy is not enforced on submission.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LocalBoard {
    pub name: &'static str,
    pub sub_local_boards: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegionalBoard {
    pub name: &'static str,
    pub local_boards: &'static [LocalBoard],
}

pub static BOARD_HIERARCHY: &[RegionalBoard] = &[
    RegionalBoard {
        name: "Southern India",
        local_boards: &[
            LocalBoard {
                name: "Secunderabad",
                sub_local_boards: &[
                    "Gudiyatnoor",
                    "Jainoor",
                    "Adilabad Society",
                    "Echoda",
                    "Nirmal",
                    "Nizamabad",
                    "Karimnagar",
                    "Kinwat",
                    "Secunderabad",
                    "Kompally",
                ],
            },
            LocalBoard {
                name: "Hyderabad",
                sub_local_boards: &[
                    "Hyderabad",
                    "Mehdipatnam",
                    "Warangal",
                    "Nanded",
                    "Parbhani",
                    "Bodhan",
                ],
            },
            LocalBoard {
                name: "Bengaluru",
                sub_local_boards: &[
                    "Bengaluru",
                    "Chennai",
                    "Pallavaram",
                ],
            },
        ],
    },
    RegionalBoard {
        name: "Central Northern Eastern India",
        local_boards: &[
            LocalBoard {
                name: "Nagpur",
                sub_local_boards: &[
                    "Agra",
                    "Brahmapuri",
                    "Desaiganj",
                    "Dhanora",
                    "Katol",
                    "Nagbhir",
                    "New Delhi",
                    "Ujjain",
                    "Armori",
                    "Chandrapur",
                    "Gadhchiroli",
                    "Gondia",
                    "Indore",
                    "Kanpur",
                    "Nagpur",
                    "Wardha",
                    "Chindwara",
                    "Jabalpur",
                    "Lanji",
                ],
            },
            LocalBoard {
                name: "Yavatmal",
                sub_local_boards: &[
                    "Akola",
                    "Ralegaon",
                    "Dongerkharda",
                    "Ghatanji",
                    "Mohda",
                    "Pandharkawda",
                    "Pusad",
                    "Wani",
                    "Yavatmal",
                ],
            },
            LocalBoard {
                name: "Raipur - Kolkata",
                sub_local_boards: &[
                    "Bilaspur",
                    "Dongergadh",
                    "Durg",
                    "Raipur",
                    "Rajnandgaon",
                    "Angool",
                    "Kolkatta",
                    "Cuttack",
                ],
            },
        ],
    },
    RegionalBoard {
        name: "Western India",
        local_boards: &[
            LocalBoard {
                name: "South Mumbai",
                sub_local_boards: &[
                    "Bellard Pier",
                    "Napeansea Road",
                    "Aga Hall",
                    "Aga Khan Baug",
                    "Andheri",
                    "Bandra Bazar",
                    "Bandra Society",
                    "Byculla",
                    "Colaba",
                    "Darkhana",
                    "Hasnabad",
                    "Karimabad (Sby)",
                    "Kurla",
                    "Mahim",
                    "Santacruz",
                    "Versova",
                ],
            },
            LocalBoard {
                name: "North Mumbai",
                sub_local_boards: &[
                    "Dahisar",
                    "Delta",
                    "Dhanu Road",
                    "Green Park",
                    "Green View (Mira Road)",
                    "Jogeshwari",
                    "Malad West",
                    "Manekpur",
                    "Mira Road",
                    "Palghar",
                    "Vaishalinagar",
                    "Virar",
                ],
            },
            LocalBoard {
                name: "Vapi Sanjan",
                sub_local_boards: &[
                    "Kasavaroti",
                    "Udhwa",
                    "Valsad",
                    "Khanvel",
                    "Nani Daman",
                    "Sanjan",
                    "Selvasa",
                    "Solsumba",
                    "Umergaon",
                    "Vapi",
                ],
            },
            LocalBoard {
                name: "Goa",
                sub_local_boards: &[
                    "Kolhapur",
                    "Mapusa",
                    "Belgaum",
                    "Madgaon",
                    "Panjim",
                    "Ponda",
                    "Vasco",
                ],
            },
            LocalBoard {
                name: "Pune",
                sub_local_boards: &[
                    "Karad",
                    "Ahmednagar",
                    "Narangibaug",
                    "Palace View",
                    "Pune Wadi",
                    "Shrirampur",
                    "Aurangabad",
                    "Fazilpura",
                ],
            },
            LocalBoard {
                name: "Thane",
                sub_local_boards: &[
                    "Nasik Road",
                    "Panvel",
                    "Vashi",
                    "Dombivali",
                    "Kalyan",
                    "Kausa",
                    "Mumbra",
                    "Nasik City",
                    "Pen",
                    "Thane",
                ],
            },
        ],
    },
    RegionalBoard {
        name: "Northern Eastern Gujarat",
        local_boards: &[
            LocalBoard {
                name: "Surat",
                sub_local_boards: &[
                    "Bharuch",
                    "Bodeli",
                    "Nandurbar",
                    "Utiadara",
                    "Ankleshwar",
                    "Kosamba",
                    "Navsari",
                    "Rander",
                    "Kanskiwad",
                    "Karimabad (Surat)",
                    "Unn Society",
                ],
            },
            LocalBoard {
                name: "Kutch",
                sub_local_boards: &[
                    "Baladia",
                    "Mata Na Madh",
                    "Wandhia",
                    "Wanki",
                    "Anjar",
                    "Bharapar",
                    "Bhuj",
                    "Gandhidham",
                    "Kera",
                    "Madhapar",
                    "Mundra",
                    "Nagalpur",
                    "Rapar",
                    "Sinugra",
                ],
            },
            LocalBoard {
                name: "Sidhpur",
                sub_local_boards: &[
                    "Abadpura",
                    "Alipura",
                    "Deesa",
                    "Kunwara",
                    "Deodara",
                    "Dethali",
                    "Karan",
                    "Karimabad (Kunwara)",
                    "Ladjipura",
                    "Lodhpur",
                    "Manpura",
                    "Mehdipura",
                    "Meloj",
                    "Meta",
                    "Methan",
                    "Metrana",
                    "Punasan",
                    "Samoda",
                    "Sidhpur",
                    "Vanasan",
                    "Varsila",
                    "Vishnagar",
                ],
            },
            LocalBoard {
                name: "Ahmedabad",
                sub_local_boards: &[
                    "Gundi",
                    "Kalupur",
                    "Sanand",
                    "Tarapur",
                    "Karimabad (Ahd)",
                    "Anand",
                    "Anand Society",
                    "Dholka",
                    "Gandhinagar",
                    "Jantanagar",
                    "Kankaria",
                    "Khambhat",
                    "Gupti",
                    "Shahalam",
                    "Shahpur",
                    "Vadodara",
                    "Viramgam",
                ],
            },
        ],
    },
    RegionalBoard {
        name: "Northern Saurashtra",
        local_boards: &[
            LocalBoard {
                name: "Jamnagar",
                sub_local_boards: &[
                    "Bhatia",
                    "Dhrol",
                    "Dodhia",
                    "Ishwaria",
                    "Jamnagar",
                    "Jivapar",
                    "Kanalush",
                    "Khoja Beraja",
                    "Khodiyar Colony",
                    "Lalpur",
                    "Sarmat",
                    "Setalush",
                ],
            },
            LocalBoard {
                name: "Bhavnagar",
                sub_local_boards: &[
                    "Budhel",
                    "Chogath",
                    "Bhavnagar",
                    "Bhavnagar Gupti",
                    "Sihor",
                    "Bhimdad",
                    "Barvala Ghelasa",
                    "Gadhada Swamina",
                    "Palitana",
                ],
            },
            LocalBoard {
                name: "Mahuva",
                sub_local_boards: &[
                    "Bagdana",
                    "Thadiya",
                    "Gunderna",
                    "Jesar",
                    "Mahuva",
                    "Rajula",
                    "Talaja",
                    "Timbi",
                    "Jafferabad",
                ],
            },
            LocalBoard {
                name: "Surendranagar - Botad",
                sub_local_boards: &[
                    "Ran ni Tikar",
                    "Golden Park",
                    "Chotila",
                    "Dhangadhra",
                    "Diamond Society",
                    "Halvad",
                    "Joravarnagar",
                    "Limbdi",
                    "Silver Park",
                    "Thangadh",
                    "Jerampara",
                    "Wadhwan City",
                    "Karimabad (Dhanduka)",
                    "Ranpur",
                    "Botad",
                    "Botad Karimnagar",
                    "Dhandhuka",
                    "Vinchiya",
                ],
            },
            LocalBoard {
                name: "Rajkot",
                sub_local_boards: &[
                    "Ami Varsha",
                    "Bhadla",
                    "Gauridhar",
                    "Jetpur Machhu",
                    "Kotada Sangani",
                    "Sanosara Mota",
                    "Sardhar",
                    "Dawoodi Plot",
                    "Akashdeep",
                    "Anandnagar",
                    "Ghunada",
                    "Gondal City",
                    "Gondal Society",
                    "Kalavad",
                    "Lajai",
                    "Lodhika",
                    "Maliya Miyana",
                    "Morbi",
                    "Morbi Society",
                    "Nava Thorala",
                    "Raiya Road",
                    "Bhogani Sheri",
                    "Vakaner",
                ],
            },
        ],
    },
    RegionalBoard {
        name: "Southern Saurashtra",
        local_boards: &[
            LocalBoard {
                name: "Amreli - Una",
                sub_local_boards: &[
                    "Amreli Society",
                    "Lilya Mota",
                    "Amreli",
                    "Babra",
                    "Bagasara",
                    "Damnagar",
                    "Dhari Navi Vasahat",
                    "Dedan",
                    "Diu",
                    "Ghogla",
                    "Khambha",
                    "Una",
                ],
            },
            LocalBoard {
                name: "Chitravad - Malia Hatina",
                sub_local_boards: &[
                    "Amrapur",
                    "Bhalchel",
                    "Chitravad",
                    "Gangecha",
                    "Haripur",
                    "Jinjuda",
                    "Kenedypur",
                    "Kodinar",
                    "Lathodra",
                    "Malia Hatina",
                    "Nani Khodiar",
                    "Sangodra",
                    "Shergad",
                    "Veraval",
                    "Virpur",
                ],
            },
            LocalBoard {
                name: "Junagadh",
                sub_local_boards: &[
                    "Jamka",
                    "Paneli Moti",
                    "Bilkha",
                    "Dhoraji",
                    "Jetpur Kanthi",
                    "Junagadh",
                    "Karimabad (Jnd)",
                    "Upleta",
                    "Chorvad",
                    "Fagri",
                    "Meswan",
                    "Paswaria",
                    "Agatrai",
                    "Badodar",
                    "Jonpur",
                    "Keshod Limda Chowk",
                    "Keshod Gandhinagar",
                    "Mangrol",
                ],
            },
            LocalBoard {
                name: "Porbundar",
                sub_local_boards: &[
                    "Madhavpur Ghed",
                    "Bhanwad Bhod",
                    "Porbundar",
                    "Ranavav",
                    "Raval",
                ],
            },
        ],
    },
];

pub fn find_regional(name: &str) -> Option<&'static RegionalBoard> {
    BOARD_HIERARCHY.iter().find(|r| r.name == name.trim())
}

/// Local boards of a regional board, `None` for an unknown regional board
pub fn local_boards(regional: &str) -> Option<Vec<&'static str>> {
    find_regional(regional).map(|r| r.local_boards.iter().map(|l| l.name).collect())
}

/// Sub-local boards of a local board. An empty slice is a valid answer:
/// not every local board has sub-local boards.
pub fn sub_local_boards(regional: &str, local: &str) -> Option<&'static [&'static str]> {
    find_regional(regional)?
        .local_boards
        .iter()
        .find(|l| l.name == local.trim())
        .map(|l| l.sub_local_boards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regional_lookup() {
        assert_eq!(BOARD_HIERARCHY.len(), 6);
        let locals = local_boards("Western India").unwrap();
        assert!(locals.contains(&"Pune"));
        assert!(local_boards("Atlantis").is_none());
    }

    #[test]
    fn test_sub_local_lookup() {
        let subs = sub_local_boards("Southern India", "Bengaluru").unwrap();
        assert_eq!(subs, &["Bengaluru", "Chennai", "Pallavaram"]);
        assert!(sub_local_boards("Southern India", "Pune").is_none());
    }

    #[test]
    fn test_every_local_board_has_sub_boards() {
        for regional in BOARD_HIERARCHY {
            for local in regional.local_boards {
                assert!(!local.sub_local_boards.is_empty(), "{}", local.name);
            }
        }
    }
}
