//! Fixed vocabularies used by profiles and listings

string_enum! {
    /// Puerto Rico municipality, used as the location of profiles and listings
    Municipio, "municipio" {
        Adjuntas => "Adjuntas",
        Aguada => "Aguada",
        Aguadilla => "Aguadilla",
        AguasBuenas => "Aguas Buenas",
        Aibonito => "Aibonito",
        Anasco => "Añasco",
        Arecibo => "Arecibo",
        Arroyo => "Arroyo",
        Barceloneta => "Barceloneta",
        Barranquitas => "Barranquitas",
        Bayamon => "Bayamón",
        CaboRojo => "Cabo Rojo",
        Caguas => "Caguas",
        Camuy => "Camuy",
        Canovanas => "Canóvanas",
        Carolina => "Carolina",
        Catano => "Cataño",
        Cayey => "Cayey",
        Ceiba => "Ceiba",
        Ciales => "Ciales",
        Cidra => "Cidra",
        Coamo => "Coamo",
        Comerio => "Comerío",
        Corozal => "Corozal",
        Culebra => "Culebra",
        Dorado => "Dorado",
        Fajardo => "Fajardo",
        Florida => "Florida",
        Guanica => "Guánica",
        Guayama => "Guayama",
        Guayanilla => "Guayanilla",
        Guaynabo => "Guaynabo",
        Gurabo => "Gurabo",
        Hatillo => "Hatillo",
        Hormigueros => "Hormigueros",
        Humacao => "Humacao",
        Isabela => "Isabela",
        Jayuya => "Jayuya",
        JuanaDiaz => "Juana Díaz",
        Juncos => "Juncos",
        Lajas => "Lajas",
        Lares => "Lares",
        LasMarias => "Las Marías",
        LasPiedras => "Las Piedras",
        Loiza => "Loíza",
        Luquillo => "Luquillo",
        Manati => "Manatí",
        Maricao => "Maricao",
        Maunabo => "Maunabo",
        Mayaguez => "Mayagüez",
        Moca => "Moca",
        Morovis => "Morovis",
        Naguabo => "Naguabo",
        Naranjito => "Naranjito",
        Orocovis => "Orocovis",
        Patillas => "Patillas",
        Penuelas => "Peñuelas",
        Ponce => "Ponce",
        Quebradillas => "Quebradillas",
        Rincon => "Rincón",
        RioGrande => "Río Grande",
        SabanaGrande => "Sabana Grande",
        Salinas => "Salinas",
        SanGerman => "San Germán",
        SanJuan => "San Juan",
        SanLorenzo => "San Lorenzo",
        SanSebastian => "San Sebastián",
        SantaIsabel => "Santa Isabel",
        ToaAlta => "Toa Alta",
        ToaBaja => "Toa Baja",
        TrujilloAlto => "Trujillo Alto",
        Utuado => "Utuado",
        VegaAlta => "Vega Alta",
        VegaBaja => "Vega Baja",
        Vieques => "Vieques",
        Villalba => "Villalba",
        Yabucoa => "Yabucoa",
        Yauco => "Yauco",
    }
}

string_enum! {
    /// Listing category
    Category, "category" {
        Smartphones => "Smartphones",
        Laptops => "Laptops",
        Tablets => "Tablets",
        DesktopComputers => "Desktop Computers",
        GamingConsoles => "Gaming Consoles",
        Tvs => "TVs",
        AudioEquipment => "Audio Equipment",
        Cameras => "Cameras",
        SmartHome => "Smart Home",
        Accessories => "Accessories",
        Components => "Components",
        Networking => "Networking",
        Wearables => "Wearables",
        Other => "Other",
    }
}

string_enum! {
    /// Physical condition of a listed item
    Condition, "condition" {
        New => "New",
        LikeNew => "Like New",
        Good => "Good",
        Fair => "Fair",
        ForParts => "For Parts",
    }
}

string_enum! {
    /// How a seller wants to be reached
    ContactPreference, "contact preference" {
        WhatsApp => "WhatsApp",
        Email => "Email",
        Phone => "Phone",
        Messages => "Messages",
    }
}

impl ContactPreference {
    /// Whether the contact info for this preference is a phone number
    pub fn is_phone_based(&self) -> bool {
        !matches!(self, ContactPreference::Email)
    }
}
