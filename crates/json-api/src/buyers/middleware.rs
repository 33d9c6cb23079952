//! Buyer identity middleware.

use salvo::prelude::*;

use farmgate_app::domain::buyers::BuyerUuid;

use crate::{buyers::BUYER_HEADER, extensions::*};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(buyer) = extract_buyer(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid x-buyer-uuid header"));
        ctrl.skip_rest();

        return;
    };

    depot.insert_buyer_uuid(buyer);

    ctrl.call_next(req, depot, res).await;
}

fn extract_buyer(req: &Request) -> Option<BuyerUuid> {
    req.headers()
        .get(BUYER_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
