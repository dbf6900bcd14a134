//! Default material catalog.
//!
//! The starter price list offered to a newly onboarded workshop. Base
//! prices are national reference prices in MXN; they get adjusted to
//! the workshop's state exactly once, at onboarding, via
//! [`crate::pricing::region`]. Changing the registered state later
//! does not retroactively reprice an existing catalog.

use crate::pricing::region::adjusted_price;

/// One entry of the built-in catalog.
#[derive(Debug, Clone)]
pub struct CatalogMaterial {
    pub name: &'static str,
    pub unit: &'static str,
    pub price: f64,
    pub category: &'static str,
    pub description: &'static str,
}

/// Unit labels a material may use.
pub const MATERIAL_UNITS: &[&str] = &["metro", "kilogramo", "pieza", "litro", "metro²"];

pub const DEFAULT_MATERIALS: &[CatalogMaterial] = &[
    CatalogMaterial {
        name: "PTR 1x1 calibre 14",
        unit: "metro",
        price: 36.0,
        category: "Perfiles rectangulares",
        description: "Perfil tubular rectangular de 1 pulgada x 1 pulgada, calibre 14",
    },
    CatalogMaterial {
        name: "PTR 2x1 calibre 14",
        unit: "metro",
        price: 38.0,
        category: "Perfiles rectangulares",
        description: "Perfil tubular rectangular de 2 pulgadas x 1 pulgada, calibre 14",
    },
    CatalogMaterial {
        name: "PTR 2x2 calibre 14",
        unit: "metro",
        price: 43.0,
        category: "Perfiles rectangulares",
        description: "Perfil tubular rectangular de 2 pulgadas x 2 pulgadas, calibre 14",
    },
    CatalogMaterial {
        name: "PTR 3x2 calibre 14",
        unit: "metro",
        price: 52.0,
        category: "Perfiles rectangulares",
        description: "Perfil tubular rectangular de 3 pulgadas x 2 pulgadas, calibre 14",
    },
    CatalogMaterial {
        name: "PTR 4x2 calibre 14",
        unit: "metro",
        price: 65.0,
        category: "Perfiles rectangulares",
        description: "Perfil tubular rectangular de 4 pulgadas x 2 pulgadas, calibre 14",
    },
    CatalogMaterial {
        name: "Ángulo 1x1 calibre 3/16",
        unit: "metro",
        price: 35.0,
        category: "Ángulos",
        description: "Ángulo de acero de 1 pulgada x 1 pulgada, calibre 3/16",
    },
    CatalogMaterial {
        name: "Ángulo 1.5x1.5 calibre 3/16",
        unit: "metro",
        price: 42.0,
        category: "Ángulos",
        description: "Ángulo de acero de 1.5 pulgadas x 1.5 pulgadas, calibre 3/16",
    },
    CatalogMaterial {
        name: "Ángulo 2x2 calibre 3/16",
        unit: "metro",
        price: 48.0,
        category: "Ángulos",
        description: "Ángulo de acero de 2 pulgadas x 2 pulgadas, calibre 3/16",
    },
    CatalogMaterial {
        name: "Lámina galvanizada calibre 22",
        unit: "metro²",
        price: 65.0,
        category: "Láminas",
        description: "Lámina de acero galvanizada calibre 22",
    },
    CatalogMaterial {
        name: "Lámina galvanizada calibre 20",
        unit: "metro²",
        price: 75.0,
        category: "Láminas",
        description: "Lámina de acero galvanizada calibre 20",
    },
    CatalogMaterial {
        name: "Lámina galvanizada calibre 18",
        unit: "metro²",
        price: 85.0,
        category: "Láminas",
        description: "Lámina de acero galvanizada calibre 18",
    },
    CatalogMaterial {
        name: "Solera 1 pulgada calibre 3/16",
        unit: "metro",
        price: 29.0,
        category: "Soleras",
        description: "Solera de acero de 1 pulgada de ancho, calibre 3/16",
    },
    CatalogMaterial {
        name: "Solera 1.5 pulgadas calibre 3/16",
        unit: "metro",
        price: 38.0,
        category: "Soleras",
        description: "Solera de acero de 1.5 pulgadas de ancho, calibre 3/16",
    },
    CatalogMaterial {
        name: "Solera 2 pulgadas calibre 3/16",
        unit: "metro",
        price: 45.0,
        category: "Soleras",
        description: "Solera de acero de 2 pulgadas de ancho, calibre 3/16",
    },
    CatalogMaterial {
        name: "Redondo macizo 3/8",
        unit: "metro",
        price: 23.0,
        category: "Redondos",
        description: "Varilla redonda maciza de 3/8 de pulgada",
    },
    CatalogMaterial {
        name: "Redondo macizo 1/2",
        unit: "metro",
        price: 32.0,
        category: "Redondos",
        description: "Varilla redonda maciza de 1/2 pulgada",
    },
    CatalogMaterial {
        name: "Redondo macizo 5/8",
        unit: "metro",
        price: 45.0,
        category: "Redondos",
        description: "Varilla redonda maciza de 5/8 de pulgada",
    },
    CatalogMaterial {
        name: "Cuadrado macizo 1/2",
        unit: "metro",
        price: 42.0,
        category: "Cuadrados",
        description: "Varilla cuadrada maciza de 1/2 pulgada",
    },
    CatalogMaterial {
        name: "Cuadrado macizo 5/8",
        unit: "metro",
        price: 58.0,
        category: "Cuadrados",
        description: "Varilla cuadrada maciza de 5/8 de pulgada",
    },
    CatalogMaterial {
        name: "Cuadrado macizo 3/4",
        unit: "metro",
        price: 72.0,
        category: "Cuadrados",
        description: "Varilla cuadrada maciza de 3/4 de pulgada",
    },
    CatalogMaterial {
        name: "Placa de acero 1/8",
        unit: "metro²",
        price: 92.0,
        category: "Placas",
        description: "Placa de acero de 1/8 de pulgada de espesor",
    },
    CatalogMaterial {
        name: "Placa de acero 1/4",
        unit: "metro²",
        price: 165.0,
        category: "Placas",
        description: "Placa de acero de 1/4 de pulgada de espesor",
    },
    CatalogMaterial {
        name: "Placa de acero 3/8",
        unit: "metro²",
        price: 245.0,
        category: "Placas",
        description: "Placa de acero de 3/8 de pulgada de espesor",
    },
    CatalogMaterial {
        name: "Tubo redondo 1 pulgada calibre 14",
        unit: "metro",
        price: 28.0,
        category: "Tubos redondos",
        description: "Tubo redondo de 1 pulgada de diámetro, calibre 14",
    },
    CatalogMaterial {
        name: "Tubo redondo 1.5 pulgadas calibre 14",
        unit: "metro",
        price: 35.0,
        category: "Tubos redondos",
        description: "Tubo redondo de 1.5 pulgadas de diámetro, calibre 14",
    },
    CatalogMaterial {
        name: "Tubo redondo 2 pulgadas calibre 14",
        unit: "metro",
        price: 48.0,
        category: "Tubos redondos",
        description: "Tubo redondo de 2 pulgadas de diámetro, calibre 14",
    },
    CatalogMaterial {
        name: "Electrodo 6011 1/8",
        unit: "kilogramo",
        price: 85.0,
        category: "Soldadura",
        description: "Electrodo para soldadura 6011 de 1/8 de pulgada",
    },
    CatalogMaterial {
        name: "Electrodo 6013 1/8",
        unit: "kilogramo",
        price: 85.0,
        category: "Soldadura",
        description: "Electrodo para soldadura 6013 de 1/8 de pulgada",
    },
    CatalogMaterial {
        name: "Electrodo 7018 1/8",
        unit: "kilogramo",
        price: 125.0,
        category: "Soldadura",
        description: "Electrodo para soldadura 7018 de 1/8 de pulgada",
    },
    CatalogMaterial {
        name: "Primer anticorrosivo",
        unit: "litro",
        price: 95.0,
        category: "Pintura",
        description: "Primer anticorrosivo para protección del acero",
    },
    CatalogMaterial {
        name: "Esmalte sintético",
        unit: "litro",
        price: 85.0,
        category: "Pintura",
        description: "Esmalte sintético para acabado final",
    },
    CatalogMaterial {
        name: "Thinner estándar",
        unit: "litro",
        price: 45.0,
        category: "Pintura",
        description: "Thinner para dilución de pinturas",
    },
    CatalogMaterial {
        name: "Tornillo autoperforante 1/4 x 1",
        unit: "pieza",
        price: 1.5,
        category: "Tornillería",
        description: "Tornillo autoperforante de 1/4 x 1 pulgada",
    },
    CatalogMaterial {
        name: "Tornillo autoperforante 1/4 x 2",
        unit: "pieza",
        price: 2.2,
        category: "Tornillería",
        description: "Tornillo autoperforante de 1/4 x 2 pulgadas",
    },
    CatalogMaterial {
        name: "Remache pop 1/8",
        unit: "pieza",
        price: 0.8,
        category: "Tornillería",
        description: "Remache pop de 1/8 de pulgada",
    },
    CatalogMaterial {
        name: "Bisagra piano 2 pulgadas",
        unit: "metro",
        price: 85.0,
        category: "Herrajes",
        description: "Bisagra piano de 2 pulgadas de ancho",
    },
    CatalogMaterial {
        name: "Cerradura de sobreponer",
        unit: "pieza",
        price: 245.0,
        category: "Herrajes",
        description: "Cerradura de sobreponer estándar",
    },
    CatalogMaterial {
        name: "Chapa Yale estándar",
        unit: "pieza",
        price: 185.0,
        category: "Herrajes",
        description: "Chapa Yale para puertas estándar",
    },
    CatalogMaterial {
        name: "Manija de palanca",
        unit: "pieza",
        price: 125.0,
        category: "Herrajes",
        description: "Manija de palanca para puertas",
    },
    CatalogMaterial {
        name: "Candado de alta seguridad",
        unit: "pieza",
        price: 285.0,
        category: "Herrajes",
        description: "Candado de alta seguridad para portones",
    },
];

/// The default catalog with prices adjusted for a state.
pub fn adjusted_for_state(state: &str) -> Vec<CatalogMaterial> {
    DEFAULT_MATERIALS
        .iter()
        .map(|material| CatalogMaterial {
            price: adjusted_price(material.price, state),
            ..material.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_well_formed() {
        assert!(!DEFAULT_MATERIALS.is_empty());
        for material in DEFAULT_MATERIALS {
            assert!(!material.name.is_empty());
            assert!(material.price > 0.0, "{} has no price", material.name);
            assert!(
                MATERIAL_UNITS.contains(&material.unit),
                "{} uses unknown unit {}",
                material.name,
                material.unit
            );
        }
    }

    #[test]
    fn adjustment_rounds_to_whole_pesos() {
        let adjusted = adjusted_for_state("Baja California");
        let ptr = adjusted
            .iter()
            .find(|m| m.name == "PTR 1x1 calibre 14")
            .unwrap();
        // 36 * 1.15 = 41.4 -> 41
        assert_eq!(ptr.price, 41.0);
        for material in &adjusted {
            assert_eq!(material.price, material.price.round());
        }
    }

    #[test]
    fn unknown_state_keeps_rounded_base_prices() {
        let adjusted = adjusted_for_state("Wakanda");
        let rivet = adjusted.iter().find(|m| m.name == "Remache pop 1/8").unwrap();
        // 0.8 * 1.0 rounds up to the nearest peso
        assert_eq!(rivet.price, 1.0);
    }
}
