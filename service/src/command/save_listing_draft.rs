//! [`Command`] for saving a self-listed [`Property`] draft.

use common::{
    operations::{By, Insert, Select, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        property::{self, Status},
        user, Property,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for saving the content of the single [`Property`] listed by
/// its owner, without submitting it for review.
///
/// Creates a new [`Status::Draft`] listing if the owner has none yet.
#[derive(Clone, Debug)]
pub struct SaveListingDraft {
    /// ID of the owner.
    pub owner: user::Id,

    /// Content of the listing.
    pub draft: property::Draft,
}

impl<Db, Ml, Rp> Command<SaveListingDraft> for Service<Db, Ml, Rp>
where
    Db: Database<
            Select<By<Option<Property>, user::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Insert<Property>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SaveListingDraft,
    ) -> Result<Self::Ok, Self::Err> {
        let SaveListingDraft { owner, draft } = cmd;
        self.save_listing(owner, draft, None)
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<Db, Ml, Rp> Service<Db, Ml, Rp>
where
    Db: Database<
            Select<By<Option<Property>, user::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Insert<Property>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
{
    /// Saves the provided [`property::Draft`] as the listing of the provided
    /// owner, moving it to the `next` [`Status`], if any.
    ///
    /// Prices are computed with the current [`Rates`] snapshot.
    ///
    /// [`Rates`]: crate::domain::Rates
    pub(super) async fn save_listing(
        &self,
        owner: user::Id,
        draft: property::Draft,
        next: Option<Status>,
    ) -> Result<Property, Traced<ExecutionError>> {
        use ExecutionError as E;

        let prices = draft
            .prices(&self.rates().await)
            .ok_or_else(|| tracerr::new!(E::PriceOutOfRange(draft.price)))?;

        let existing = self
            .database()
            .execute(Select(By::new(owner)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let is_new = existing.is_none();

        let mut listing = match existing {
            Some(mut listing) => {
                if !listing.status.is_editable_by_owner() {
                    return Err(tracerr::new!(E::NotEditable(listing.status)));
                }
                draft.apply_to(&mut listing, prices);
                listing
            }
            None => draft.into_property(owner, prices),
        };
        if let Some(next) = next {
            if !listing.status.can_become(next) {
                return Err(tracerr::new!(E::NotEditable(listing.status)));
            }
            listing.status = next;
            listing.rejection_reason = None;
        }

        if is_new {
            self.database()
                .execute(Insert(listing.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        } else {
            self.database()
                .execute(Update(listing.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        Ok(listing)
    }
}

/// Error of [`SaveListingDraft`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Listing is under review or published, so cannot be edited by its
    /// owner.
    #[display("Listing in `{_0}` status cannot be edited")]
    NotEditable(#[error(not(source))] Status),

    /// Price of the listing cannot be stored in both currencies.
    #[display("Price `{_0}` is out of range")]
    PriceOutOfRange(#[error(not(source))] Money),
}

#[cfg(test)]
pub(crate) mod spec {
    use std::collections::BTreeSet;

    use common::{Currency, Money};
    use rust_decimal::Decimal;

    use crate::{
        command::Command as _,
        domain::{
            contact,
            image::ImageUrl,
            property::{
                self, Amenity, Category, Draft, Features, ListingType, Status,
            },
            user, Property, Rates,
        },
        spec,
    };

    use super::{ExecutionError, SaveListingDraft};

    /// Returns a complete [`Draft`] with a single photo.
    pub(crate) fn draft() -> Draft {
        Draft {
            title: property::Title::new("Casa Colibrí").unwrap(),
            description: property::Description::new("Quiet street."),
            listing_type: ListingType::Sale,
            category: Category::House,
            price: Money::new(Decimal::from(350_000), Currency::Usd),
            state: property::State::new("Guanajuato").unwrap(),
            municipality: property::Municipality::new("San Miguel de Allende")
                .unwrap(),
            neighborhood: None,
            address: None,
            features: Features {
                bedrooms: Some(3),
                ..Features::default()
            },
            amenities: BTreeSet::from([Amenity::Pool]),
            coordinates: None,
            images: vec![
                ImageUrl::new("https://cdn.example.com/1.jpg").unwrap(),
            ],
            contact: property::Contact {
                name: contact::Name::new("Luis"),
                email: contact::Email::new("luis@example.com"),
                phone: None,
            },
        }
    }

    /// Returns a [`Status::Draft`] listing of the [`draft()`] content.
    pub(crate) fn listing(owner: user::Id, rates: &Rates) -> Property {
        let draft = draft();
        let prices = draft.prices(rates).unwrap();
        draft.into_property(owner, prices)
    }

    #[tokio::test]
    async fn creates_then_updates_single_listing() {
        let svc = spec::service();
        let owner = user::Id::new();

        let created = svc
            .execute(SaveListingDraft {
                owner,
                draft: draft(),
            })
            .await
            .unwrap();
        assert_eq!(created.status, Status::Draft);
        assert!(created.show_on_storefront);
        assert!(!created.featured);
        assert_eq!(created.owner_id, Some(owner));
        assert_eq!(created.prices.usd, Some(Decimal::from(350_000)));
        assert_eq!(created.prices.mxn, Some(Decimal::from(6_125_000)));

        let mut edited = draft();
        edited.title = property::Title::new("Casa Colibrí II").unwrap();
        edited.images.clear();
        let updated = svc
            .execute(SaveListingDraft {
                owner,
                draft: edited,
            })
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, Status::Draft);
        assert_eq!(updated.created_at, created.created_at);

        let rows = svc.database().rows();
        assert_eq!(rows.properties.len(), 1);
        assert_eq!(rows.properties[0].title.to_string(), "Casa Colibrí II");
    }

    #[tokio::test]
    async fn rejected_stays_rejected() {
        let svc = spec::service();
        let owner = user::Id::new();
        let mut listing = listing(owner, &svc.rates().await);
        listing.status = Status::Rejected;
        listing.rejection_reason = property::RejectionReason::new("Blurry");
        svc.database().rows().properties.push(listing);

        let saved = svc
            .execute(SaveListingDraft {
                owner,
                draft: draft(),
            })
            .await
            .unwrap();

        assert_eq!(saved.status, Status::Rejected);
        assert!(saved.rejection_reason.is_some());
    }

    #[tokio::test]
    async fn pending_and_active_are_not_editable() {
        for status in [Status::Pending, Status::Active] {
            let svc = spec::service();
            let owner = user::Id::new();
            let mut listing = listing(owner, &svc.rates().await);
            listing.status = status;
            svc.database().rows().properties.push(listing);

            let err = svc
                .execute(SaveListingDraft {
                    owner,
                    draft: draft(),
                })
                .await
                .unwrap_err();

            assert!(matches!(
                err.as_ref(),
                ExecutionError::NotEditable(s) if *s == status,
            ));
            assert_eq!(
                svc.database().rows().properties[0].title.to_string(),
                "Casa Colibrí",
            );
        }
    }

    #[tokio::test]
    async fn rejects_unstorable_price_before_touching_database() {
        let svc = spec::service();
        let mut content = draft();
        content.price = Money::new(Decimal::MAX, Currency::Usd);

        let err = svc
            .execute(SaveListingDraft {
                owner: user::Id::new(),
                draft: content,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PriceOutOfRange(m) if m.amount == Decimal::MAX,
        ));
        let rows = svc.database().rows();
        assert_eq!(rows.operations, 0);
        assert!(rows.properties.is_empty());
    }
}
