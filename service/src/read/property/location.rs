//! Reference list of locations suggested in search selectors.
//!
//! Stored properties are not restricted to these locations.

/// Mexican states along with their municipalities, in display order.
const LOCATIONS: &[(&str, &[&str])] = &[
    (
        "Guanajuato",
        &[
            "San Miguel de Allende",
            "Guanajuato",
            "León",
            "Dolores Hidalgo",
            "Celaya",
            "Irapuato",
            "Comonfort",
        ],
    ),
    (
        "Jalisco",
        &[
            "Guadalajara",
            "Zapopan",
            "Tlaquepaque",
            "Tlajomulco de Zúñiga",
            "Puerto Vallarta",
            "Chapala",
            "Ajijic",
            "Jocotepec",
        ],
    ),
    (
        "Quintana Roo",
        &[
            "Cancún",
            "Playa del Carmen",
            "Tulum",
            "Puerto Morelos",
            "Cozumel",
            "Isla Mujeres",
            "Bacalar",
        ],
    ),
    (
        "Baja California Sur",
        &[
            "Los Cabos",
            "Cabo San Lucas",
            "San José del Cabo",
            "La Paz",
            "Todos Santos",
            "Loreto",
        ],
    ),
    (
        "Nayarit",
        &[
            "Bahía de Banderas",
            "Nuevo Vallarta",
            "Sayulita",
            "San Pancho",
            "Tepic",
            "Compostela",
        ],
    ),
    (
        "Querétaro",
        &[
            "Querétaro",
            "Corregidora",
            "El Marqués",
            "San Juan del Río",
            "Tequisquiapan",
        ],
    ),
    (
        "Yucatán",
        &["Mérida", "Progreso", "Valladolid", "Izamal", "Telchac Puerto"],
    ),
    (
        "Oaxaca",
        &[
            "Oaxaca de Juárez",
            "Puerto Escondido",
            "Huatulco",
            "Mazunte",
            "Zipolite",
        ],
    ),
    (
        "Ciudad de México",
        &[
            "Benito Juárez",
            "Coyoacán",
            "Cuauhtémoc",
            "Miguel Hidalgo",
            "Álvaro Obregón",
            "Tlalpan",
            "Cuajimalpa",
        ],
    ),
    (
        "Puebla",
        &[
            "Puebla",
            "San Andrés Cholula",
            "San Pedro Cholula",
            "Atlixco",
            "Tehuacán",
        ],
    ),
];

/// Returns the states of the reference list in their display order.
pub fn states() -> impl ExactSizeIterator<Item = &'static str> {
    LOCATIONS.iter().map(|(state, _)| *state)
}

/// Returns the municipalities of the provided `state` in their display order.
///
/// Unknown `state` has no municipalities.
#[must_use]
pub fn municipalities(state: &str) -> &'static [&'static str] {
    LOCATIONS
        .iter()
        .find_map(|(s, m)| (*s == state).then_some(*m))
        .unwrap_or_default()
}

#[cfg(test)]
mod spec {
    use super::{municipalities, states};

    #[test]
    fn lists_states_in_order() {
        let states = states().collect::<Vec<_>>();

        assert_eq!(states.len(), 10);
        assert_eq!(states[0], "Guanajuato");
        assert!(states.contains(&"Ciudad de México"));
    }

    #[test]
    fn municipalities_belong_to_their_state() {
        assert_eq!(municipalities("Guanajuato")[0], "San Miguel de Allende");
        assert!(municipalities("Quintana Roo").contains(&"Tulum"));
        assert!(!municipalities("Jalisco").contains(&"Tulum"));

        assert!(municipalities("Texas").is_empty());
        assert!(municipalities("guanajuato").is_empty());
    }
}
