//! [`Development`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Coordinates,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        development::{self, Branding, Contacts, Location, Seo},
        Development,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::development::Visibility,
};

/// Columns of the `developments` table making up a [`Development`].
const COLUMNS: &str = "\
    id, name, slug, tagline, description, \
    primary_color, secondary_color, logo_url, hero_image_url, gallery, \
    address, state, municipality, latitude, longitude, \
    amenities, contact_email, contact_phone, contact_whatsapp, \
    seo_title, seo_description, \
    is_active, featured, created_at, updated_at";

/// Reads a [`Development`] out of the provided [`Row`] of [`COLUMNS`].
fn from_row(row: &Row) -> Development {
    Development {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        tagline: row.get("tagline"),
        description: row.get("description"),
        branding: Branding {
            primary_color: row.get("primary_color"),
            secondary_color: row.get("secondary_color"),
            logo: row.get("logo_url"),
        },
        hero_image: row.get("hero_image_url"),
        gallery: row.get("gallery"),
        location: Location {
            address: row.get("address"),
            state: row.get("state"),
            municipality: row.get("municipality"),
            coordinates: Coordinates::from_parts(
                row.get("latitude"),
                row.get("longitude"),
            ),
        },
        amenities: row.get("amenities"),
        contacts: Contacts {
            email: row.get("contact_email"),
            phone: row.get("contact_phone"),
            whatsapp: row.get("contact_whatsapp"),
        },
        seo: Seo {
            title: row.get("seo_title"),
            description: row.get("seo_description"),
        },
        is_active: row.get("is_active"),
        featured: row.get("featured"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Database<Select<By<Option<Development>, development::Id>>> for Postgres {
    type Ok = Option<Development>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Development>, development::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        Ok(self
            .query_opt(
                format!(
                    "SELECT {COLUMNS} \
                     FROM developments \
                     WHERE id = $1::UUID"
                )
                .as_str(),
                &[&id],
            )
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl Database<Select<By<Option<Development>, development::Slug>>>
    for Postgres
{
    type Ok = Option<Development>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Development>, development::Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let slug = by.into_inner();

        Ok(self
            .query_opt(
                format!(
                    "SELECT {COLUMNS} \
                     FROM developments \
                     WHERE slug = $1::VARCHAR"
                )
                .as_str(),
                &[&slug],
            )
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl Database<Select<By<Vec<Development>, Visibility>>> for Postgres {
    type Ok = Vec<Development>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Development>, Visibility>>,
    ) -> Result<Self::Ok, Self::Err> {
        let cond = match by.into_inner() {
            Visibility::Published => "is_active",
            Visibility::All => "TRUE",
        };

        Ok(self
            .query(
                format!(
                    "SELECT {COLUMNS} \
                     FROM developments \
                     WHERE {cond} \
                     ORDER BY featured DESC, name ASC, id ASC"
                )
                .as_str(),
                &[],
            )
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl Database<Insert<Development>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(development): Insert<Development>,
    ) -> Result<Self::Ok, Self::Err> {
        write(self, development, false).await.map_err(tracerr::wrap!())
    }
}

impl Database<Update<Development>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(development): Update<Development>,
    ) -> Result<Self::Ok, Self::Err> {
        write(self, development, true).await.map_err(tracerr::wrap!())
    }
}

/// Inserts the provided [`Development`], or overwrites the existing one with
/// the same ID if `upsert` is `true`.
///
/// Plain inserts never overwrite, so a colliding ID or [`development::Slug`]
/// is reported as a unique violation.
async fn write(
    db: &Postgres,
    development: Development,
    upsert: bool,
) -> Result<(), Traced<database::Error>> {
    let Development {
        id,
        name,
        slug,
        tagline,
        description,
        branding,
        hero_image,
        gallery,
        location,
        amenities,
        contacts,
        seo,
        is_active,
        featured,
        created_at,
        updated_at,
    } = development;
    let latitude = location.coordinates.map(|c| c.latitude());
    let longitude = location.coordinates.map(|c| c.longitude());

    const INSERT: &str = "\
        INSERT INTO developments (\
            id, name, slug, tagline, description, \
            primary_color, secondary_color, logo_url, hero_image_url, \
            gallery, \
            address, state, municipality, latitude, longitude, \
            amenities, contact_email, contact_phone, contact_whatsapp, \
            seo_title, seo_description, \
            is_active, featured, created_at, updated_at \
        ) VALUES (\
            $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, $5::TEXT, \
            $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, $9::VARCHAR, \
            $10::TEXT[], \
            $11::VARCHAR, $12::VARCHAR, $13::VARCHAR, \
            $14::FLOAT8, $15::FLOAT8, \
            $16::TEXT[], $17::VARCHAR, $18::VARCHAR, $19::VARCHAR, \
            $20::VARCHAR, $21::VARCHAR, \
            $22::BOOL, $23::BOOL, $24::TIMESTAMPTZ, $25::TIMESTAMPTZ \
        )";
    const UPSERT: &str = "\
        ON CONFLICT (id) DO UPDATE \
        SET name = EXCLUDED.name, \
            slug = EXCLUDED.slug, \
            tagline = EXCLUDED.tagline, \
            description = EXCLUDED.description, \
            primary_color = EXCLUDED.primary_color, \
            secondary_color = EXCLUDED.secondary_color, \
            logo_url = EXCLUDED.logo_url, \
            hero_image_url = EXCLUDED.hero_image_url, \
            gallery = EXCLUDED.gallery, \
            address = EXCLUDED.address, \
            state = EXCLUDED.state, \
            municipality = EXCLUDED.municipality, \
            latitude = EXCLUDED.latitude, \
            longitude = EXCLUDED.longitude, \
            amenities = EXCLUDED.amenities, \
            contact_email = EXCLUDED.contact_email, \
            contact_phone = EXCLUDED.contact_phone, \
            contact_whatsapp = EXCLUDED.contact_whatsapp, \
            seo_title = EXCLUDED.seo_title, \
            seo_description = EXCLUDED.seo_description, \
            is_active = EXCLUDED.is_active, \
            featured = EXCLUDED.featured, \
            updated_at = EXCLUDED.updated_at";
    let sql = if upsert {
        format!("{INSERT} {UPSERT}")
    } else {
        INSERT.to_owned()
    };

    db.exec(
        sql.as_str(),
        &[
            &id,
            &name,
            &slug,
            &tagline,
            &description,
            &branding.primary_color,
            &branding.secondary_color,
            &branding.logo,
            &hero_image,
            &gallery,
            &location.address,
            &location.state,
            &location.municipality,
            &latitude,
            &longitude,
            &amenities,
            &contacts.email,
            &contacts.phone,
            &contacts.whatsapp,
            &seo.title,
            &seo.description,
            &is_active,
            &featured,
            &created_at,
            &updated_at,
        ],
    )
    .await
    .map_err(tracerr::wrap!())
    .map(drop)
}

impl Database<Delete<By<Development, development::Id>>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Development, development::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM developments \
            WHERE id = $1::UUID";
        Ok(self
            .exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            > 0)
    }
}
